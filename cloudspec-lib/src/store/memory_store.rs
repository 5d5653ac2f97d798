use super::{ResourceStore, StoreError};
use crate::model::{AttributeValue, Resource, ResourceDef, ResourceDefRef, ResourceId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Partition = Arc<RwLock<BTreeMap<ResourceId, Resource>>>;

/// An in-memory [`ResourceStore`].
///
/// Every resource type gets its own partition lock. The outer map is only write-locked
/// when a partition is created, so loads of distinct types do not contend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    definitions: RwLock<HashMap<ResourceDefRef, ResourceDef>>,
    partitions: RwLock<HashMap<ResourceDefRef, Partition>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored resources across all partitions
    #[must_use]
    pub fn resource_count(&self) -> usize {
        read(&self.partitions).values().map(|partition| read(partition).len()).sum()
    }

    fn partition(&self, def_ref: &ResourceDefRef) -> Option<Partition> {
        read(&self.partitions).get(def_ref).map(Arc::clone)
    }

    fn partition_or_create(&self, def_ref: &ResourceDefRef) -> Partition {
        if let Some(partition) = self.partition(def_ref) {
            return partition;
        }

        Arc::clone(write(&self.partitions).entry(def_ref.clone()).or_default())
    }

    fn update<F>(&self, def_ref: &ResourceDefRef, id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Resource),
    {
        let not_found = || StoreError::ResourceNotFound {
            def_ref: def_ref.clone(),
            id: id.to_string(),
        };

        let partition = self.partition(def_ref).ok_or_else(not_found)?;
        let mut resources = write(&partition);
        let resource = resources.get_mut(id).ok_or_else(not_found)?;
        f(resource);
        Ok(())
    }
}

impl ResourceStore for MemoryStore {
    fn save_definition(&self, def: ResourceDef) {
        let _ = write(&self.definitions).insert(def.def_ref().clone(), def);
    }

    fn definition(&self, def_ref: &ResourceDefRef) -> Option<ResourceDef> {
        read(&self.definitions).get(def_ref).cloned()
    }

    fn save_resource(&self, def_ref: &ResourceDefRef, id: &str) {
        let partition = self.partition_or_create(def_ref);
        let mut resources = write(&partition);
        if !resources.contains_key(id) {
            let resource = Resource::new(def_ref.clone(), id);
            let _ = resources.insert(resource.id_arc(), resource);
        }
    }

    fn save_resource_with(&self, resource: Resource) {
        let partition = self.partition_or_create(resource.def_ref());
        let _ = write(&partition).insert(resource.id_arc(), resource);
    }

    fn exists(&self, def_ref: &ResourceDefRef, id: &str) -> bool {
        self.partition(def_ref).is_some_and(|partition| read(&partition).contains_key(id))
    }

    fn resource(&self, def_ref: &ResourceDefRef, id: &str) -> Option<Resource> {
        let partition = self.partition(def_ref)?;
        let resources = read(&partition);
        resources.get(id).cloned()
    }

    fn resources_by_definition(&self, def_ref: &ResourceDefRef) -> Vec<Resource> {
        self.partition(def_ref)
            .map(|partition| read(&partition).values().cloned().collect())
            .unwrap_or_default()
    }

    fn attributes(&self, def_ref: &ResourceDefRef, id: &str) -> Option<BTreeMap<String, AttributeValue>> {
        self.resource(def_ref, id).map(|r| r.attributes().clone())
    }

    fn associations(&self, def_ref: &ResourceDefRef, id: &str) -> Option<BTreeMap<String, Vec<ResourceId>>> {
        self.resource(def_ref, id).map(|r| r.associations().clone())
    }

    fn save_attribute(&self, def_ref: &ResourceDefRef, id: &str, name: &str, value: AttributeValue) -> Result<(), StoreError> {
        self.update(def_ref, id, |resource| resource.set_attribute(name.to_string(), value))
    }

    fn save_association(&self, def_ref: &ResourceDefRef, id: &str, name: &str, ids: Vec<ResourceId>) -> Result<(), StoreError> {
        self.update(def_ref, id, |resource| resource.add_association(name.to_string(), ids))
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
