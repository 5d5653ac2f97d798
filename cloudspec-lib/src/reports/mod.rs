//! Report generation for validation results
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: human-readable output with optional ANSI colors
//! - **JSON**: machine-readable structured data, optionally including the load report
//!
//! Both preserve the declaration order of groups and rules.

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
