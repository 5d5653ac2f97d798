use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::manager::ManagerError;
use crate::preflight::preflight_all;
use clap::Parser;
use ohno::app_err;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct PreflightArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Report every unresolved reference instead of stopping at the first one
    #[arg(long)]
    pub all: bool,
}

/// Check a specification's references against the configured providers without loading resources
pub fn preflight_spec<H: Host>(host: &mut H, args: &PreflightArgs) -> Result<()> {
    let session = Session::new(&args.common, None)?;

    let errors = if args.all {
        preflight_all(&session.spec, session.manager.providers())
    } else {
        match session.manager.preflight(&session.spec) {
            Ok(()) => Vec::new(),
            Err(ManagerError::Preflight(e)) => vec![e],
            Err(e) => return Err(e.into()),
        }
    };

    if errors.is_empty() {
        let _ = writeln!(host.output(), "Specification '{}' passed preflight", session.spec.name());
        return Ok(());
    }

    for e in &errors {
        let _ = writeln!(host.error(), "❌ {e}");
    }

    Err(app_err!("specification '{}' has {} unresolved reference(s)", session.spec.name(), errors.len()))
}
