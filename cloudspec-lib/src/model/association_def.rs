use super::ResourceDefRef;
use std::sync::Arc;

/// Declares that resources of one type refer to resources of `target` by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationDef {
    name: Arc<str>,
    description: Arc<str>,
    target: ResourceDefRef,
}

impl AssociationDef {
    #[must_use]
    pub fn new(name: impl AsRef<str>, description: impl AsRef<str>, target: ResourceDefRef) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            description: Arc::from(description.as_ref()),
            target,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn target(&self) -> &ResourceDefRef {
        &self.target
    }
}
