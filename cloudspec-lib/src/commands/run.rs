//! Command dispatch logic for cloudspec

use super::{CheckArgs, InitArgs, PreflightArgs, check_spec, init_config, preflight_spec};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "cloudspec", version, author, long_about = None)]
#[command(about = "Validate cloud resource inventories against policy specifications")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: CloudspecSubcommand,
}

#[derive(Subcommand, Debug)]
enum CloudspecSubcommand {
    /// Validate resources against a specification and report the results
    Check(Box<CheckArgs>),
    /// Check a specification's references without loading resources
    Preflight(Box<PreflightArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        CloudspecSubcommand::Check(check_args) => check_spec(host, check_args).await,
        CloudspecSubcommand::Preflight(preflight_args) => preflight_spec(host, preflight_args),
        CloudspecSubcommand::Init(init_args) => init_config(host, init_args),
    }
}
