use super::{AssociationDef, AttributeValue, ResourceDefRef, ResourceId};
use crate::store::ResourceStore;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A loaded instance of a resource type.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    def_ref: ResourceDefRef,
    id: ResourceId,
    attributes: BTreeMap<String, AttributeValue>,
    associations: BTreeMap<String, Vec<ResourceId>>,
}

impl Resource {
    #[must_use]
    pub fn new(def_ref: ResourceDefRef, id: impl AsRef<str>) -> Self {
        Self {
            def_ref,
            id: Arc::from(id.as_ref()),
            attributes: BTreeMap::new(),
            associations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_parts(
        def_ref: ResourceDefRef,
        id: impl AsRef<str>,
        attributes: BTreeMap<String, AttributeValue>,
        associations: BTreeMap<String, Vec<ResourceId>>,
    ) -> Self {
        Self {
            def_ref,
            id: Arc::from(id.as_ref()),
            attributes,
            associations,
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_association<I, S>(mut self, name: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.associations
            .entry(name.into())
            .or_default()
            .extend(ids.into_iter().map(|id| Arc::from(id.as_ref())));
        self
    }

    #[must_use]
    pub const fn def_ref(&self) -> &ResourceDefRef {
        &self.def_ref
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn id_arc(&self) -> ResourceId {
        Arc::clone(&self.id)
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    #[must_use]
    pub fn association(&self, name: &str) -> Option<&[ResourceId]> {
        self.associations.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub const fn associations(&self) -> &BTreeMap<String, Vec<ResourceId>> {
        &self.associations
    }

    /// Resolve an association's ids against the store.
    ///
    /// Ids with no stored resource are skipped.
    #[must_use]
    pub fn associated(&self, association: &AssociationDef, store: &dyn ResourceStore) -> Vec<Self> {
        self.association(association.name())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| store.resource(association.target(), id))
            .collect()
    }

    pub(crate) fn set_attribute(&mut self, name: String, value: AttributeValue) {
        let _ = self.attributes.insert(name, value);
    }

    pub(crate) fn add_association(&mut self, name: String, ids: impl IntoIterator<Item = ResourceId>) {
        let linked = self.associations.entry(name).or_default();
        for id in ids {
            if !linked.contains(&id) {
                linked.push(id);
            }
        }
    }
}
