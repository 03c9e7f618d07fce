//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Data layout selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Array-of-records: workers receive copies of their slice
    Records,
    /// Structure-of-arrays: workers write into a shared column arena
    Columns,
    /// Run both layouts and report a comparison
    Both,
}

/// LayoutPulse - Memory-layout profiling tool
#[derive(Parser, Debug)]
#[command(name = "layoutpulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of records in the dataset (e.g. 500000, 250k, 2m)
    #[arg(short = 'n', long, default_value = "1m")]
    pub records: String,

    /// Data layout(s) to benchmark
    #[arg(short = 'l', long, value_enum, default_value = "both")]
    pub layout: LayoutArg,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Number of passes over the dataset
    #[arg(short = 'p', long, default_value = "3")]
    pub passes: usize,

    /// Seed for the exponent sampler (omit for entropy seeding)
    #[arg(long, env = "LAYOUTPULSE_SEED")]
    pub seed: Option<u64>,

    /// TOML configuration file (CLI flags take precedence)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Verification Options ===
    /// Verify dataset invariants after each run
    #[arg(long)]
    pub verify: bool,

    // === Output Options ===
    /// JSON report file path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// CSV report file path
    #[arg(long)]
    pub csv_output: Option<PathBuf>,

    /// Show latency statistics
    #[arg(long)]
    pub show_latency: bool,

    /// Show latency percentiles
    #[arg(long)]
    pub show_percentiles: bool,

    /// Include per-worker rows in reports
    #[arg(long)]
    pub per_worker: bool,

    /// Output verbosity level (repeat for more)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    // === Runtime Options ===
    /// Validate configuration and exit without running
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments from the process environment
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations that clap cannot express
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(threads) = self.threads {
            if threads == 0 {
                anyhow::bail!("--threads must be greater than 0");
            }
        }
        if self.passes == 0 {
            anyhow::bail!("--passes must be greater than 0");
        }
        Ok(())
    }
}
