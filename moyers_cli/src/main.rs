//! # Moyers CLI Application
//!
//! Terminal front end for the mixed dentition space analysis. Measurements
//! come from flags or interactive prompts; results go to stdout as text or
//! JSON, logs and prompts go to stderr.

use clap::Parser;
use moyers_core::{ArchType, CalcError};
use serde_json::json;

mod cli;
mod commands;
mod logging;
mod measurements;

use crate::cli::{Cli, Command};
use crate::logging::{init_logging, LogConfig};
use crate::measurements::MeasurementFlags;

fn main() {
    let cli = Cli::parse();
    let json = match &cli.command {
        Command::Lower(args) => args.output.json,
        Command::Upper(args) => args.output.json,
        _ => false,
    };

    let exit_code = match init_logging(&LogConfig::from_cli(&cli)).and_then(|()| run(cli.command)) {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error, json);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Lower(args) => {
            let flags = MeasurementFlags {
                incisor_sum: args.incisor_sum,
                space_available: args.space_available,
                ..Default::default()
            };
            commands::run_analysis(ArchType::Lower, &flags, args.output)
        }
        Command::Upper(args) => {
            let flags = MeasurementFlags {
                incisor_sum: args.incisor_sum,
                space_available: args.space_available,
                current_overjet: args.current_overjet,
                target_overjet: args.target_overjet,
            };
            commands::run_analysis(ArchType::Upper, &flags, args.output)
        }
        Command::Table { arch } => commands::run_table(arch.into()),
        Command::About => commands::run_about(),
    }
}

fn report_error(error: &anyhow::Error, json: bool) {
    match error.downcast_ref::<CalcError>() {
        Some(calc) => tracing::debug!(field = calc.field(), code = calc.error_code(), "{calc}"),
        None => tracing::debug!("{error:#}"),
    }

    if json {
        if let Ok(body) = serde_json::to_string_pretty(&error_json(error)) {
            println!("{body}");
            return;
        }
    }
    match error.downcast_ref::<CalcError>() {
        Some(calc) => eprintln!("error: {}", calc.user_message()),
        None => eprintln!("error: {error:#}"),
    }
}

/// JSON body for a failed run.
///
/// Measurement errors keep the `CalcError` shape; anything else (I/O,
/// logging setup) is reported as `{"type": "Internal", "details": {"message": ..}}`.
fn error_json(error: &anyhow::Error) -> serde_json::Value {
    let internal = || json!({ "type": "Internal", "details": { "message": format!("{error:#}") } });
    match error.downcast_ref::<CalcError>() {
        Some(calc) => serde_json::to_value(calc).unwrap_or_else(|_| internal()),
        None => internal(),
    }
}
