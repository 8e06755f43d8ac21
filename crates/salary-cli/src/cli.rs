//! CLI argument definitions for the salary schedule toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tracing::level_filters::LevelFilter;

use salary_cli::logging::LogFormat;
use salary_model::ResolveStrategy;

#[derive(Parser)]
#[command(
    name = "salary-schedule",
    version,
    about = "Teacher salary schedule toolkit - parse, resolve, diff and compare",
    long_about = "Work with district teacher salary schedules.\n\n\
                  Parses pasted or OCR'd salary tables, resolves cells against sparse\n\
                  partially calculated schedules, and turns edited values into the\n\
                  minimal set of validated edit records."
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
    /// Parse a pasted salary table into a structured grid.
    Parse(ParseArgs),

    /// Resolve one cell, or the whole visible grid, of a schedule.
    Resolve(ResolveArgs),

    /// Turn edited values into validated edit records.
    Diff(DiffArgs),

    /// Compare one cell across several districts.
    Compare(CompareArgs),
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Text file holding the pasted table (reads stdin when omitted or `-`).
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ParseFormatArg,

    /// JSON object mapping header words to B, M or D (replaces the built-in table).
    #[arg(long = "vocabulary", value_name = "FILE")]
    pub vocabulary: Option<PathBuf>,

    /// Data lines inspected to infer the column count.
    #[arg(long = "probe-lines", value_name = "N")]
    pub probe_lines: Option<usize>,
}

/// Options shared by commands that pick one schedule out of a file.
#[derive(Parser)]
pub struct ScheduleSelector {
    /// School year to use, e.g. 2024-2025 (default: latest).
    #[arg(long = "school-year", value_name = "YYYY-YYYY")]
    pub school_year: Option<String>,

    /// Schedule period (default: "Full Year" when present).
    #[arg(long = "period")]
    pub period: Option<String>,
}

/// A target cell given as a column header and a step.
#[derive(Parser)]
pub struct TargetArgs {
    /// Column, written like a schedule header: B, M+30, MA30, CAGS, DOC.
    #[arg(long = "column")]
    pub column: String,

    /// Step number.
    #[arg(long = "step")]
    pub step: u32,
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Schedules JSON file (array, or object with a `schedules` array).
    #[arg(long = "schedules", value_name = "FILE")]
    pub schedules: PathBuf,

    #[command(flatten)]
    pub selector: ScheduleSelector,

    /// Column of the cell to resolve (prints the whole grid when omitted).
    #[arg(long = "column", requires = "step")]
    pub column: Option<String>,

    /// Step of the cell to resolve.
    #[arg(long = "step", requires = "column")]
    pub step: Option<u32>,

    /// How calculated or missing cells are resolved.
    #[arg(long = "strategy", value_enum, default_value = "provenance-then-search")]
    pub strategy: StrategyArg,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct DiffArgs {
    /// Original schedules JSON file.
    #[arg(long = "schedules", value_name = "FILE")]
    pub schedules: PathBuf,

    /// Edited values: a JSON array of `{school_year, period, education,
    /// credits, step, value}` entries.
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Stop at the first invalid value.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// District schedules as NAME=FILE; repeat for each district.
    #[arg(long = "district", value_name = "NAME=FILE", required = true)]
    pub districts: Vec<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub selector: ScheduleSelector,

    /// How calculated or missing cells are resolved.
    #[arg(long = "strategy", value_enum, default_value = "provenance-then-search")]
    pub strategy: StrategyArg,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ParseFormatArg {
    Table,
    Json,
    Csv,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Provenance,
    Search,
    ProvenanceThenSearch,
}

impl From<StrategyArg> for ResolveStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Provenance => Self::Provenance,
            StrategyArg::Search => Self::Search,
            StrategyArg::ProvenanceThenSearch => Self::ProvenanceThenSearch,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(value: LogLevelArg) -> Self {
        match value {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
