//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use moyers_core::ArchType;

#[derive(Parser)]
#[command(
    name = "moyers",
    version,
    about = "Moyer's mixed dentition space analysis",
    long_about = "Predict the space needed by unerupted canines and premolars from the\n\
                  sum of the mandibular incisors, and compare it with the space available.\n\n\
                  Values not given as flags are asked for interactively."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze the lower (mandibular) arch.
    Lower(LowerArgs),

    /// Analyze the upper (maxillary) arch, including overjet correction.
    Upper(UpperArgs),

    /// Print the 75% probability level prediction table for an arch.
    Table {
        #[arg(value_enum)]
        arch: ArchArg,
    },

    /// Print background on the analysis.
    About,
}

#[derive(Args)]
pub struct LowerArgs {
    /// Sum of the four mandibular incisor widths (mm).
    #[arg(long = "incisor-sum", value_name = "MM")]
    pub incisor_sum: Option<String>,

    /// Space available for the canine and premolars (mm).
    #[arg(long = "space-available", value_name = "MM")]
    pub space_available: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct UpperArgs {
    /// Sum of the four mandibular incisor widths (mm).
    #[arg(long = "incisor-sum", value_name = "MM")]
    pub incisor_sum: Option<String>,

    /// Space available for the canine and premolars (mm).
    #[arg(long = "space-available", value_name = "MM")]
    pub space_available: Option<String>,

    /// Overjet as measured (mm).
    #[arg(long = "current-overjet", value_name = "MM")]
    pub current_overjet: Option<String>,

    /// Overjet aimed for after treatment (mm).
    #[arg(long = "target-overjet", value_name = "MM")]
    pub target_overjet: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone, Copy, Default)]
pub struct OutputArgs {
    /// Print the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Use default values instead of prompting for missing measurements.
    #[arg(long = "no-prompt")]
    pub no_prompt: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArchArg {
    Lower,
    Upper,
}

impl From<ArchArg> for ArchType {
    fn from(arch: ArchArg) -> Self {
        match arch {
            ArchArg::Lower => ArchType::Lower,
            ArchArg::Upper => ArchType::Upper,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
