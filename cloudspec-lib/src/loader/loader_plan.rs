use crate::model::{ParseRefError, ResourceDefRef};
use crate::spec::Spec;
use std::collections::BTreeSet;
use thiserror::Error;

/// A rule whose resource type could not be parsed while planning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("group '{group}', rule '{rule}': {source}")]
pub struct PlanError {
    pub group: String,
    pub rule: String,
    #[source]
    pub source: ParseRefError,
}

/// The deduplicated, ordered set of resource types a specification needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderPlan {
    def_refs: BTreeSet<ResourceDefRef>,
}

impl LoaderPlan {
    pub fn new(spec: &Spec) -> Result<Self, PlanError> {
        let mut def_refs = BTreeSet::new();
        for (group, rule) in spec.rules() {
            let def_ref = rule.resource_def_ref().map_err(|source| PlanError {
                group: group.name().to_string(),
                rule: rule.title().to_string(),
                source,
            })?;
            let _ = def_refs.insert(def_ref);
        }

        Ok(Self { def_refs })
    }

    pub fn def_refs(&self) -> impl Iterator<Item = &ResourceDefRef> {
        self.def_refs.iter()
    }

    #[must_use]
    pub fn contains(&self, def_ref: &ResourceDefRef) -> bool {
        self.def_refs.contains(def_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.def_refs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.def_refs.is_empty()
    }
}
