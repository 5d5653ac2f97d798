//! Command-line interface and orchestration for cloudspec
//!
//! This module implements the CLI commands and wires the library's components together
//! for end-to-end runs. It handles argument parsing, configuration management, and the
//! high-level workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **check**: compile a specification, preflight it, load the resources it needs from
//!   the configured providers, validate, and generate reports
//! - **preflight**: compile a specification and check its references without loading
//!   any resources
//! - **init**: generate a default configuration file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. The `common` module sets up logging, loads the
//! configuration and the specification, registers one inventory provider per configured
//! entry, and initiates a [`Manager`](crate::manager::Manager) over an in-memory store.

mod check;
mod common;
mod config;
mod host;
mod init;
mod preflight;
mod progress_reporter;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use check::{CheckArgs, check_spec};
#[cfg(test)]
pub use host::TestHost;
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use preflight::{PreflightArgs, preflight_spec};
pub use progress_reporter::ProgressReporter;
pub use run::run;
