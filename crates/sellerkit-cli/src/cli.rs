//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sellerkit",
    version,
    about = "Validate Amazon seller report CSVs against declarative schemas",
    long_about = "Validate seller report CSV exports (advertising, listings, inventory)\n\
                  against built-in or user-supplied schemas. Reports every violation\n\
                  found in one pass, with typed, transformed output on success."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

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
    /// Validate a CSV file against a schema.
    Validate(ValidateArgs),

    /// List the built-in report schemas.
    Schemas,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the CSV file to validate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Registry key of a built-in schema (see `sellerkit schemas`).
    #[arg(long = "schema", value_name = "KEY", conflicts_with = "schema_file")]
    pub schema: Option<String>,

    /// Path to a TOML schema file instead of a built-in schema.
    #[arg(long = "schema-file", value_name = "PATH")]
    pub schema_file: Option<PathBuf>,

    /// Emit the result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Maximum number of violations to display (all are counted).
    #[arg(long = "max-issues", value_name = "N", default_value_t = 10)]
    pub max_issues: usize,

    /// Hide the progress bar even on a terminal.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
