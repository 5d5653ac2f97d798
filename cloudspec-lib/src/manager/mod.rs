//! Lifecycle of a validation run
//!
//! The [`Manager`] owns the shared provider registry and resource store and enforces
//! the order of a run: [`Manager::init`] first, then preflight, loading, and validation.

mod manager;
mod manager_error;

pub use manager::Manager;
pub use manager_error::ManagerError;
