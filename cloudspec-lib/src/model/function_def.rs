use super::AttributeType;
use std::sync::Arc;

/// Declares a function a provider exposes on a resource type.
///
/// Functions are part of the schema only; the validation engine never invokes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    name: Arc<str>,
    description: Arc<str>,
    return_type: AttributeType,
}

impl FunctionDef {
    #[must_use]
    pub fn new(name: impl AsRef<str>, description: impl AsRef<str>, return_type: AttributeType) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            description: Arc::from(description.as_ref()),
            return_type,
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
    pub const fn return_type(&self) -> AttributeType {
        self.return_type
    }
}
