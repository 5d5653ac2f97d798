//! Resource providers
//!
//! A [`Provider`] offers resource type definitions and fetches live resources of those
//! types. Providers are collected in an explicit [`Providers`] registry, built at startup
//! and shared by `Arc` with preflight, the loader, and the manager.
//!
//! [`InventoryProvider`] is a file-backed provider that reads both definitions and
//! resource records from a JSON document.

mod inventory;
mod provider;
mod registry;

pub use inventory::InventoryProvider;
pub use provider::{Provider, ProviderError};
pub use registry::Providers;
