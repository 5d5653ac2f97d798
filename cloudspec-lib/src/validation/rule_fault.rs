use crate::expr::EvalError;
use crate::model::ResourceDefRef;
use thiserror::Error;

/// A fault that stops a single rule from being evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleFault {
    #[error("resource '{resource_id}' has no attribute '{attribute}'")]
    MissingAttribute { resource_id: String, attribute: String },

    #[error("resource '{resource_id}', attribute '{attribute}': {source}")]
    Evaluation {
        resource_id: String,
        attribute: String,
        #[source]
        source: EvalError,
    },

    #[error("resource type '{reference}' is not a valid 'provider:group:resource' name")]
    UnresolvedType { reference: String },

    #[error("resources of type '{def_ref}' could not be loaded: {message}")]
    LoadFailed { def_ref: ResourceDefRef, message: String },
}
