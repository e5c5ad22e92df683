//! CLI argument definitions for the tabular profiler.

use std::path::PathBuf;

use chrono::TimeDelta;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tabprof_cli::duration::parse_duration;
use tabprof_report::TableFormat;
use tabprof_times::DEFAULT_MAX_CATEGORIES;

#[derive(Parser)]
#[command(
    name = "tabprof",
    version,
    about = "Profile CSV tables: statistics, frequencies and time gaps",
    long_about = "Profile CSV tables.\n\n\
                  Computes dtype-aware distribution statistics and value frequencies,\n\
                  and finds gaps in time-indexed data, overall or per category."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Profile a whole table: shape, duplicates, memory and nulls per row.
    Profile(ProfileArgs),

    /// Profile one column: counts, frequencies and distribution statistics.
    Column(ColumnArgs),

    /// List gaps between successive timestamps.
    Gaps(GapsArgs),

    /// Total time each category was absent from a time-indexed column.
    CategoryGaps(CategoryGapsArgs),
}

/// Options shared by commands that load a CSV file.
#[derive(Args)]
pub struct InputArgs {
    /// CSV file to read.
    #[arg(value_name = "CSV")]
    pub path: PathBuf,

    /// Column to use as row labels.
    #[arg(long = "index-col", value_name = "COLUMN")]
    pub index_column: Option<String>,

    /// Keep date-like text columns as strings.
    #[arg(long = "no-parse-dates")]
    pub no_parse_dates: bool,
}

/// Options shared by commands that render a profile.
#[derive(Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Write the profile to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Name shown in the profile header.
    #[arg(long = "name")]
    pub name: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ColumnArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Column to profile.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// Most common values listed in the frequency table.
    #[arg(long = "most", default_value_t = 10)]
    pub most: usize,

    /// Least common values listed in the frequency table.
    #[arg(long = "least", default_value_t = 5)]
    pub least: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct GapsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only differences above this duration are gaps, e.g. `90s` or `1h30m`.
    #[arg(long = "threshold", value_name = "DURATION", value_parser = parse_duration)]
    pub threshold: TimeDelta,

    /// Datetime column to scan instead of the row labels.
    #[arg(long = "column", value_name = "COLUMN", conflicts_with = "index_column")]
    pub column: Option<String>,

    /// List every difference instead of only the gaps.
    #[arg(long = "all")]
    pub all: bool,
}

#[derive(Args)]
pub struct CategoryGapsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Column whose distinct values are the categories.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// Only differences above this duration count towards a gap.
    #[arg(long = "threshold", value_name = "DURATION", value_parser = parse_duration)]
    pub threshold: TimeDelta,

    /// Skip the computation above this many distinct values.
    #[arg(long = "max-categories", default_value_t = DEFAULT_MAX_CATEGORIES)]
    pub max_categories: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Text,
    Html,
    Json,
}

impl From<FormatArg> for TableFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => Self::Text,
            FormatArg::Html => Self::Html,
            FormatArg::Json => Self::Json,
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
