//! Storage for resource definitions and loaded resources
//!
//! The [`ResourceStore`] trait is the boundary through which the loader writes
//! resources and the validation engine reads them. [`MemoryStore`] is a
//! partitioned in-memory implementation.

mod memory_store;
mod resource_store;

pub use memory_store::MemoryStore;
pub use resource_store::{ResourceStore, StoreError};
