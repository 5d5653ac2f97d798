use super::Host;
use super::common::{self, CommonArgs, Session};
use crate::Result;
use crate::loader::{LoadReport, Progress};
use crate::reports::{generate_console, generate_json};
use crate::validation::SpecResult;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output the validation results to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output the validation results to the console.
    /// If omitted, console output is shown only when no other report is generated.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Exit with status code 1 if any rule failed or errored
    #[arg(long)]
    pub error_if_failed: bool,
}

/// Preflight, load, and validate a specification, then report the results
pub async fn check_spec<H: Host>(host: &mut H, args: &CheckArgs) -> Result<()> {
    let progress = common::progress_reporter(&args.common);
    let mut session = Session::new(&args.common, Some(Arc::new(progress.clone()) as Arc<dyn Progress>))?;

    session.manager.preflight(&session.spec).into_app_err("checking specification references")?;

    let load_report = session
        .manager
        .load_resources(&session.spec)
        .await
        .into_app_err("loading resources")?
        .clone();
    progress.done();

    report_load_problems(host, &load_report);

    let result = session.manager.validate(&session.spec).into_app_err("validating specification")?;

    if args.console || args.json.is_none() {
        let use_colors = common::use_colors(args.common.color, || {
            use std::io::{IsTerminal, stdout};
            stdout().is_terminal()
        });

        let mut console_output = String::new();
        generate_console(&result, use_colors, &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if let Some(filename) = &args.json {
        write_json(filename, &result, &load_report)?;
    }

    if args.error_if_failed && !result.is_success() {
        return Err(ohno::AppError::new("one or more rules failed or errored"));
    }

    Ok(())
}

fn report_load_problems<H: Host>(host: &mut H, load_report: &LoadReport) {
    for (def_ref, reason) in load_report.skipped() {
        let _ = writeln!(host.error(), "Skipped resource type '{def_ref}': {reason}");
    }

    for (def_ref, message) in load_report.failed() {
        let _ = writeln!(host.error(), "Could not load resource type '{def_ref}': {message}");
    }
}

fn write_json(filename: &Utf8PathBuf, result: &SpecResult, load_report: &LoadReport) -> Result<()> {
    let mut json_output = String::new();
    generate_json(result, Some(load_report), &mut json_output)?;
    fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
    Ok(())
}
