use crate::model::ResourceDefRef;
use thiserror::Error;

/// A reference in a specification that does not resolve against the registered providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreflightError {
    #[error("group '{group}', rule '{rule}': resource type '{reference}' does not resolve to a registered provider")]
    UnresolvedReference { group: String, rule: String, reference: String },

    #[error("group '{group}', rule '{rule}': resource type '{def_ref}' is not defined by its provider")]
    UnknownResourceType {
        group: String,
        rule: String,
        def_ref: ResourceDefRef,
    },

    #[error("group '{group}', rule '{rule}': attribute '{attribute}' is not defined on resource type '{def_ref}'")]
    UnknownAttribute {
        group: String,
        rule: String,
        def_ref: ResourceDefRef,
        attribute: String,
    },
}

impl PreflightError {
    #[must_use]
    pub fn group(&self) -> &str {
        match self {
            Self::UnresolvedReference { group, .. } | Self::UnknownResourceType { group, .. } | Self::UnknownAttribute { group, .. } => group,
        }
    }

    #[must_use]
    pub fn rule(&self) -> &str {
        match self {
            Self::UnresolvedReference { rule, .. } | Self::UnknownResourceType { rule, .. } | Self::UnknownAttribute { rule, .. } => rule,
        }
    }
}
