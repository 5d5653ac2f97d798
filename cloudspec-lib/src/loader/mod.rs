//! Populating the resource store
//!
//! A [`LoaderPlan`] is the set of resource types a specification needs. The [`Loader`]
//! fetches each planned type from its provider and writes the resources into a
//! [`ResourceStore`](crate::store::ResourceStore), recording the per-type outcome in a
//! [`LoadReport`].
//!
//! # Implementation Model
//!
//! Provider calls are blocking and run on tokio's blocking pool, one task per type. A
//! semaphore bounds how many run at once and every call is wrapped in a deadline. Types
//! whose provider is missing or does not define them are skipped, and a provider error
//! or an expired deadline fails only that type.

mod load_report;
mod loader;
mod loader_plan;
mod progress;

pub use load_report::{LoadReport, SkipReason};
pub use loader::{DEFAULT_LOAD_CONCURRENCY, DEFAULT_PROVIDER_TIMEOUT, Loader};
pub use loader_plan::{LoaderPlan, PlanError};
pub use progress::Progress;
