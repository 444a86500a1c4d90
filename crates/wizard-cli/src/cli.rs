//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use wizard_cli::overrides::{
    MappingOverride, MergeOverride, TransformOverride, parse_mapping_override,
    parse_merge_override, parse_transform_override,
};

#[derive(Parser)]
#[command(
    name = "wizard",
    version,
    about = "Map, transform and validate CSV and spreadsheet imports",
    long_about = "Map, transform and validate CSV and spreadsheet imports.\n\n\
                  Columns of an uploaded file are matched to a set of expected\n\
                  fields, merged and transformed, then validated row by row."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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

    /// Configuration file (default: the platform config directory).
    #[arg(long = "config", value_name = "TOML", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the first rows of a file with their row indices.
    Preview(PreviewArgs),

    /// Run the whole wizard on a file and export the cleaned records.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// CSV or spreadsheet file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of rows to show.
    #[arg(long = "rows", default_value_t = 10)]
    pub rows: usize,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// CSV or spreadsheet file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON array of expected columns (`field`, `label`, `required`, `dataType`).
    #[arg(long = "columns", value_name = "JSON")]
    pub columns: PathBuf,

    /// Absolute index of the header row.
    #[arg(long = "header-row", value_name = "N")]
    pub header_row: Option<usize>,

    /// Primary source override, e.g. `age=2` or `age=none`.
    #[arg(long = "map", value_name = "FIELD=INDEX", value_parser = parse_mapping_override)]
    pub map: Vec<MappingOverride>,

    /// Additional sources override, e.g. `name=0,3`.
    #[arg(long = "merge", value_name = "FIELD=INDICES", value_parser = parse_merge_override)]
    pub merge: Vec<MergeOverride>,

    /// Transformation override, e.g. `age=number:2` or `name=capitalize`.
    #[arg(long = "transform", value_name = "FIELD=TYPE[:ARG]", value_parser = parse_transform_override)]
    pub transform: Vec<TransformOverride>,

    /// Template JSON whose transformations and merges are applied first.
    #[arg(long = "template", value_name = "JSON")]
    pub template: Option<PathBuf>,

    /// Write cleaned records as JSON to this file.
    #[arg(long = "output", value_name = "JSON")]
    pub output: Option<PathBuf>,

    /// Records shown when no output file is given.
    #[arg(long = "preview", default_value_t = 5)]
    pub preview: usize,

    /// Maximum number of issues listed.
    #[arg(long = "max-issues", default_value_t = 50)]
    pub max_issues: usize,
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
