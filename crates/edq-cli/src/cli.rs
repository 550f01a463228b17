//! CLI argument definitions for the ED visit cleaner.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use edq_cli::types::RunConfig;

#[derive(Parser)]
#[command(
    name = "edq",
    version,
    about = "Clean raw emergency department visit extracts",
    long_about = "Clean a raw emergency department visit extract.\n\n\
                  Removes duplicates, repairs timestamps, standardizes gender, \
                  filters implausible ages, backfills acuity and patient keys, \
                  caps boarding time and derives the LWBS flag."
)]
pub struct Cli {
    /// Raw extract to clean (CSV).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV (default: CN_CLEAN_DATA.csv next to the input).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML file overriding cleaning options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the run report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Run the pipeline without writing the cleaned extract.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Allow row values (patient data) in log output.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            config: self.config.clone(),
            report: self.report.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
