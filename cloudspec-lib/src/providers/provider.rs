use crate::model::{Resource, ResourceDef, ResourceDefRef};
use camino::Utf8PathBuf;
use core::fmt::Debug;
use thiserror::Error;

/// Failure to fetch resources from a [`Provider`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider does not define resource type '{def_ref}'")]
    UnknownResourceType { def_ref: ResourceDefRef },

    #[error("could not read '{path}'")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode '{path}'")]
    Decode {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Other(#[source] Box<dyn core::error::Error + Send + Sync>),
}

/// A pluggable source of resource type definitions and live resources.
///
/// `resources` is the only call that performs I/O. It is invoked from a blocking
/// task by the loader, so implementations may block.
pub trait Provider: Send + Sync + Debug {
    /// The provider name, matching the first segment of every type it defines
    fn name(&self) -> &str;

    /// Every resource type this provider offers
    fn resource_defs(&self) -> Vec<ResourceDef>;

    fn resource_def(&self, def_ref: &ResourceDefRef) -> Option<ResourceDef> {
        self.resource_defs().into_iter().find(|def| def.def_ref() == def_ref)
    }

    /// Fetch all live resources of one type.
    fn resources(&self, def_ref: &ResourceDefRef) -> Result<Vec<Resource>, ProviderError>;
}
