//! CLI argument definitions for the label normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "unitnorm",
    version,
    about = "Normalize currency and unit tokens in economic time-series labels",
    long_about = "Normalize the column labels of national-accounts tables.\n\n\
                  Raw currency codes become LCU/USD, country-specific header quirks\n\
                  are repaired and unit tokens are put in their canonical order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: $UNITNORM_SETTINGS, then ./settings.toml).
    #[arg(long = "settings", value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize the labels of one or more (country, frequency) tables.
    Normalize(NormalizeArgs),

    /// List the template's unit tokens and canonical orderings, and the
    /// registered exception rules.
    Vocabulary,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Country codes, comma separated (e.g. CN,KR).
    #[arg(
        long = "country",
        value_name = "CODES",
        value_delimiter = ',',
        required = true
    )]
    pub country: Vec<String>,

    /// Frequency codes, comma separated (e.g. Q).
    #[arg(
        long = "freq",
        value_name = "CODES",
        value_delimiter = ',',
        required = true
    )]
    pub freq: Vec<String>,

    /// Write each normalized table to its canonical output path.
    #[arg(long = "persist", visible_alias = "to-db")]
    pub persist: bool,

    /// Refuse to write tables that still contain unresolved labels.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Write a JSON run report to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
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
