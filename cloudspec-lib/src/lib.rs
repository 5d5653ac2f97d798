#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for cloudspec
//!
//! This library consolidates all functionality for the cloudspec tool, which validates
//! live cloud resource inventories against declarative policy specifications.
//!
//! # Module Organization
//!
//! - [`model`]: Resource type model (type references, definitions, resources, values)
//! - [`expr`]: Predicates evaluated against attribute values
//! - [`spec`]: The specification tree and its TOML front-end
//! - [`providers`]: Provider capability, registry, and the inventory provider
//! - [`store`]: Resource storage
//! - [`preflight`]: Static checking of specification references
//! - [`loader`]: Populating the store from providers
//! - [`validation`]: Evaluating rules and building the result tree
//! - [`manager`]: Lifecycle of a validation run
//! - [`reports`]: Report generation in multiple formats
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod expr;
pub mod loader;
pub mod manager;
pub mod model;
pub mod preflight;
pub mod providers;
pub mod spec;
pub mod store;
pub mod validation;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(test)]
mod testing;

pub use crate::commands::{Host, run};
