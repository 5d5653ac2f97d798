use super::Rule;
use serde::{Deserialize, Serialize};

/// The root of a policy specification: a named list of groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Spec {
    name: String,

    #[serde(default)]
    groups: Vec<Group>,
}

impl Spec {
    #[must_use]
    pub fn new(name: impl Into<String>, groups: Vec<Group>) -> Self {
        Self { name: name.into(), groups }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Every rule with its owning group, in declaration order
    pub fn rules(&self) -> impl Iterator<Item = (&Group, &Rule)> {
        self.groups.iter().flat_map(|group| group.rules().iter().map(move |rule| (group, rule)))
    }
}

/// A named list of rules within a [`Spec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Group {
    name: String,

    #[serde(default)]
    rules: Vec<Rule>,
}

impl Group {
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self { name: name.into(), rules }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
