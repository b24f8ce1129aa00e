//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs always go to stderr so that stdout carries only the analysis output
//! (text or JSON).
//!
//! # Log Levels
//!
//! - `warn`: Rejected entries that were re-prompted (default level)
//! - `info`: Command progress
//! - `debug`: Analysis values from `moyers_core`, and the error that ended
//!   the run
//!
//! Nothing is logged at `error`. A failed run prints its message as an
//! `error:` line on stderr (or a JSON body with `--json`) regardless of the
//! log level.

use std::io;

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, LogFormatArg};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable format.
    Pretty,
    /// Single-line format.
    #[default]
    Compact,
    /// JSON lines for machine parsing.
    Json,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    pub format: LogFormat,
    /// Honour `RUST_LOG` instead of `level_filter` when it is set.
    pub use_env_filter: bool,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            format: LogFormat::default(),
            use_env_filter: true,
            with_ansi: false,
        }
    }
}

impl LogConfig {
    /// Build logging configuration from CLI flags.
    ///
    /// An explicit `-v`/`-q` wins over `RUST_LOG`.
    pub fn from_cli(cli: &Cli) -> Self {
        let format = match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        Self {
            level_filter: cli.verbosity.tracing_level_filter(),
            format,
            use_env_filter: !cli.verbosity.is_present(),
            with_ansi: io::IsTerminal::is_terminal(&io::stderr()),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        if self.use_env_filter {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return filter;
            }
        }
        EnvFilter::default().add_directive(self.level_filter.into())
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = config.env_filter();

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_ansi(config.with_ansi)
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(config.with_ansi)
                    .with_writer(io::stderr),
            )
            .try_init(),
    }
    .context("failed to install tracing subscriber")
}
