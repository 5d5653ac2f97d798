use crate::model::{AttributeValue, Resource, ResourceDef, ResourceDefRef, ResourceId};
use core::fmt::Debug;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("resource '{id}' of type '{def_ref}' has not been saved")]
    ResourceNotFound { def_ref: ResourceDefRef, id: String },
}

/// Storage for resource definitions and loaded resources.
///
/// Resources are partitioned by [`ResourceDefRef`] and keyed by id within a partition.
/// Implementations must allow concurrent writes to distinct partitions and must
/// serialize writes within a partition.
pub trait ResourceStore: Send + Sync + Debug {
    /// Record a resource type definition, replacing any previous one for the same type.
    fn save_definition(&self, def: ResourceDef);

    fn definition(&self, def_ref: &ResourceDefRef) -> Option<ResourceDef>;

    /// Create an empty resource, or leave an existing one untouched.
    fn save_resource(&self, def_ref: &ResourceDefRef, id: &str);

    /// Create or overwrite a resource with all its attributes and associations.
    fn save_resource_with(&self, resource: Resource);

    fn exists(&self, def_ref: &ResourceDefRef, id: &str) -> bool;

    fn resource(&self, def_ref: &ResourceDefRef, id: &str) -> Option<Resource>;

    /// All resources of a type, ordered by id.
    fn resources_by_definition(&self, def_ref: &ResourceDefRef) -> Vec<Resource>;

    fn attributes(&self, def_ref: &ResourceDefRef, id: &str) -> Option<BTreeMap<String, AttributeValue>>;

    fn associations(&self, def_ref: &ResourceDefRef, id: &str) -> Option<BTreeMap<String, Vec<ResourceId>>>;

    fn save_attribute(&self, def_ref: &ResourceDefRef, id: &str, name: &str, value: AttributeValue) -> Result<(), StoreError>;

    fn save_attributes(
        &self,
        def_ref: &ResourceDefRef,
        id: &str,
        attributes: BTreeMap<String, AttributeValue>,
    ) -> Result<(), StoreError> {
        for (name, value) in attributes {
            self.save_attribute(def_ref, id, &name, value)?;
        }
        Ok(())
    }

    /// Append ids to an association, ignoring ids already linked.
    fn save_association(&self, def_ref: &ResourceDefRef, id: &str, name: &str, ids: Vec<ResourceId>) -> Result<(), StoreError>;

    fn save_associations(
        &self,
        def_ref: &ResourceDefRef,
        id: &str,
        associations: BTreeMap<String, Vec<ResourceId>>,
    ) -> Result<(), StoreError> {
        for (name, ids) in associations {
            self.save_association(def_ref, id, &name, ids)?;
        }
        Ok(())
    }
}
