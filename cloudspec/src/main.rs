//! Check cloud resource inventories against policy specifications.
//!
//! `cloudspec check policy.toml` compiles the policy, confirms every resource type and
//! attribute it names is offered by a provider configured in `cloudspec.toml`, loads the
//! inventories, and reports which rules passed. `cloudspec preflight` stops after the
//! reference check and `cloudspec init` writes a starter configuration.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use cloudspec_lib::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Host for a real process: reports on stdout, diagnostics on stderr.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
