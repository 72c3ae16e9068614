//! CLI argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "mixcheckr", version)]
#[command(about = "Analyze mixes against genre benchmarks and reference tracks")]
pub struct Args {
    /// Input files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Benchmark profile (JSON)
    #[arg(short, long, env = "MIXCHECKR_BENCHMARK")]
    pub benchmark: Option<PathBuf>,

    /// Reference track to compare against (repeatable)
    #[arg(short, long = "reference")]
    pub references: Vec<PathBuf>,

    /// Engine configuration overrides (JSON)
    #[arg(short, long, env = "MIXCHECKR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// True-peak oversampling factor (overrides the config file)
    #[arg(long)]
    pub true_peak_oversample: Option<u32>,

    /// Verbose output (debug logging, per-metric tables)
    #[arg(short, long)]
    pub verbose: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}
