use super::AttributeType;
use std::sync::Arc;

/// Declares one attribute of a resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDef {
    name: Arc<str>,
    description: Arc<str>,
    attr_type: AttributeType,
    is_array: bool,
}

impl AttributeDef {
    #[must_use]
    pub fn new(name: impl AsRef<str>, description: impl AsRef<str>, attr_type: AttributeType, is_array: bool) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            description: Arc::from(description.as_ref()),
            attr_type,
            is_array,
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
    pub const fn attr_type(&self) -> AttributeType {
        self.attr_type
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.is_array
    }
}
