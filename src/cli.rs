//! CLI argument parsing for joinstat

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for joins-test results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "joinstat")]
#[command(version)]
#[command(about = "Wishart-Hirshfeld joins test for dichotomous sequences", long_about = None)]
pub struct Cli {
    /// Token file to analyze (whitespace- or comma-separated symbols)
    pub file: Option<PathBuf>,

    /// Symbol whose relative frequency estimates the event probability
    #[arg(short = 's', long = "state", value_name = "SYMBOL")]
    pub state: Option<String>,

    /// Explicit event probability in [0,1] (overrides --state)
    #[arg(short = 'p', long = "prob", value_name = "P")]
    pub prob: Option<f64>,

    /// Explicit trial count (overrides the sequence length)
    #[arg(short = 'n', long = "trials", value_name = "N")]
    pub trials: Option<u64>,

    /// Precomputed observed join count (enables parameter-only mode)
    #[arg(short = 'o', long = "observed", value_name = "K")]
    pub observed: Option<u64>,

    /// Number of tails for the significance test (1 or 2)
    #[arg(short = 't', long = "tails", value_name = "TAILS", default_value = "2")]
    pub tails: u8,

    /// Disable the 0.5 continuity correction
    #[arg(long = "no-continuity")]
    pub no_continuity: bool,

    /// Dichotomize numeric input at a cut point first (median, mean, or a number)
    #[arg(long = "cut", value_name = "CUT")]
    pub cut: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Decimal places in reported values
    #[arg(long = "precision", value_name = "DP", default_value = "5")]
    pub precision: u32,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
