//! Static semantic checking of specifications
//!
//! Preflight resolves every rule's resource type and every attribute named by its
//! filters and assertions against the registered providers, before any resource is
//! fetched. [`preflight`] stops at the first failure; [`preflight_all`] reports them all.

mod checker;
mod preflight_error;

pub use checker::{preflight, preflight_all};
pub use preflight_error::PreflightError;
