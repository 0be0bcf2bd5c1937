//! CLI argument definitions for HabitLens.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "habitlens",
    version,
    about = "Analyze exported habit-tracker collections",
    long_about = "Decode BSON collection dumps (users, challenges, forumposts, \
                  userchallenges), export each as a BOM-prefixed UTF-8 CSV, and \
                  render summary charts (totals, per-day trends, category \
                  rankings, numeric histograms) as PNG files."
)]
pub struct Cli {
    /// Directory containing the exported `<collection>.bson` files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output directory for CSVs and charts (default: <INPUT_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// How many leading entries ranked bar charts keep.
    #[arg(long = "top-n", value_name = "N", default_value_t = 10)]
    pub top_n: usize,

    /// Bucket count for numeric histograms.
    #[arg(long = "bins", value_name = "N", default_value_t = 10)]
    pub bins: usize,

    /// Write CSV exports only; skip all chart rendering.
    #[arg(long = "skip-charts")]
    pub skip_charts: bool,

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
