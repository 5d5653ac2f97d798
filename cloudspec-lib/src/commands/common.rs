//! Common processing logic shared between the check and preflight commands.

use super::ProgressReporter;
use super::config::Config;
use crate::Result;
use crate::loader::Progress;
use crate::manager::Manager;
use crate::spec::{Spec, compile};
use crate::store::MemoryStore;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::sync::Arc;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the check and preflight commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to the specification file
    #[arg(value_name = "SPEC")]
    pub spec: Utf8PathBuf,

    /// Path to configuration file (default is `cloudspec.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Everything a command needs once arguments have been processed
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub spec: Spec,
    pub manager: Manager,
}

impl Session {
    /// Set up logging, load the configuration and the specification, and initiate a manager
    pub fn new(args: &CommonArgs, progress: Option<Arc<dyn Progress>>) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
        let spec = load_spec(&args.spec)?;
        let providers = Arc::new(config.build_providers()?);

        let mut manager = Manager::new(providers, Arc::new(MemoryStore::new()))
            .with_load_limits(config.provider_timeout(), config.load_concurrency);
        if let Some(progress) = progress {
            manager = manager.with_progress(progress);
        }
        manager.init()?;

        Ok(Self { config, spec, manager })
    }
}

/// Read and compile a specification file
pub fn load_spec(path: &Utf8Path) -> Result<Spec> {
    let source = fs::read_to_string(path).into_app_err_with(|| format!("reading specification '{path}'"))?;
    let spec = compile(&source).into_app_err_with(|| format!("compiling specification '{path}'"))?;
    Ok(spec)
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// Resolve a color mode against whether the target stream is a terminal
#[must_use]
pub fn use_colors(color: ColorMode, is_terminal: impl FnOnce() -> bool) -> bool {
    match color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_terminal(),
    }
}

/// Create the progress reporter used while loading resources
#[must_use]
pub fn progress_reporter(args: &CommonArgs) -> ProgressReporter {
    let delay = if args.log_level == LogLevel::None {
        Duration::from_millis(300)
    } else {
        Duration::from_hours(365 * 24)
    };

    let use_colors = use_colors(args.color, || {
        use std::io::{IsTerminal, stderr};
        stderr().is_terminal()
    });

    ProgressReporter::new(delay, use_colors)
}
