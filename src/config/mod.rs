//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete benchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub workload: WorkloadConfig,
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Which data layout(s) a run benchmarks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Array-of-records only
    Records,
    /// Structure-of-arrays only
    Columns,
    /// Both layouts, reported side by side
    Both,
}

impl Default for LayoutMode {
    fn default() -> Self {
        Self::Both
    }
}

impl LayoutMode {
    /// The concrete layouts this mode runs, in run order
    pub fn layouts(&self) -> &'static [DataLayout] {
        match self {
            LayoutMode::Records => &[DataLayout::Records],
            LayoutMode::Columns => &[DataLayout::Columns],
            LayoutMode::Both => &[DataLayout::Records, DataLayout::Columns],
        }
    }
}

/// A single concrete data layout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataLayout {
    Records,
    Columns,
}

/// Workload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Layout(s) to benchmark
    #[serde(default)]
    pub layout: LayoutMode,
    /// Number of passes over the dataset
    #[serde(default = "default_passes")]
    pub passes: usize,
}

fn default_passes() -> usize {
    3
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Number of records in the dataset
    pub records: usize,
}

/// Worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of worker threads (one chunk is cut per thread)
    #[serde(default = "default_threads")]
    pub threads: usize,
}

fn default_threads() -> usize {
    num_cpus::get()
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON report file path
    pub json_output: Option<PathBuf>,
    /// CSV report file path
    pub csv_output: Option<PathBuf>,
    /// Show latency statistics
    #[serde(default)]
    pub show_latency: bool,
    /// Show latency percentiles
    #[serde(default)]
    pub show_percentiles: bool,
    /// Include per-worker rows in reports
    #[serde(default)]
    pub per_worker_output: bool,
    /// Output verbosity level
    #[serde(default)]
    pub verbosity: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_output: None,
            csv_output: None,
            show_latency: false,
            show_percentiles: false,
            per_worker_output: false,
            verbosity: 0,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Verify dataset invariants after each run
    #[serde(default)]
    pub verify: bool,
    /// Seed for the exponent sampler; None seeds from entropy
    pub seed: Option<u64>,
    /// Dry run mode (validate configuration and exit)
    #[serde(default)]
    pub dry_run: bool,
    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            verify: false,
            seed: None,
            dry_run: false,
            debug: false,
        }
    }
}

// Display trait implementations

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Workload: {}", self.workload)?;
        writeln!(f, "  Dataset:  {}", self.dataset)?;
        writeln!(f, "  Workers:  {}", self.workers)?;
        writeln!(f, "  Output:   {}", self.output)?;
        writeln!(f, "  Runtime:  {}", self.runtime)?;
        Ok(())
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Records => write!(f, "records"),
            LayoutMode::Columns => write!(f, "columns"),
            LayoutMode::Both => write!(f, "both"),
        }
    }
}

impl fmt::Display for DataLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLayout::Records => write!(f, "records"),
            DataLayout::Columns => write!(f, "columns"),
        }
    }
}

impl fmt::Display for WorkloadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout={}, passes={}", self.layout, self.passes)
    }
}

impl fmt::Display for DatasetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} record(s)", self.records)
    }
}

impl fmt::Display for WorkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} thread(s)", self.threads)
    }
}

impl fmt::Display for OutputConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref path) = self.json_output {
            parts.push(format!("json={}", path.display()));
        }
        if let Some(ref path) = self.csv_output {
            parts.push(format!("csv={}", path.display()));
        }
        if self.per_worker_output {
            parts.push("per_worker".to_string());
        }
        if parts.is_empty() {
            write!(f, "text output")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

impl fmt::Display for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.verify {
            parts.push("verify".to_string());
        }
        if let Some(seed) = self.seed {
            parts.push(format!("seed={}", seed));
        }
        if self.dry_run {
            parts.push("dry_run".to_string());
        }
        if self.debug {
            parts.push("debug".to_string());
        }
        if parts.is_empty() {
            write!(f, "default")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

// Validation methods

impl Config {
    /// Validate the complete configuration
    pub fn validate(&self) -> Result<(), String> {
        self.workload.validate()?;
        self.dataset.validate()?;
        self.workers.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

impl WorkloadConfig {
    /// Validate the workload configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.passes == 0 {
            return Err("passes must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl DatasetConfig {
    /// Validate the dataset configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.records == 0 {
            return Err("records must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl WorkerConfig {
    /// Validate the worker configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.threads == 0 {
            return Err("threads must be greater than 0".to_string());
        }
        if self.threads > 4096 {
            return Err(format!("threads must be at most 4096, got {}", self.threads));
        }
        Ok(())
    }
}

impl OutputConfig {
    /// Validate the output configuration
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(json), Some(csv)) = (&self.json_output, &self.csv_output) {
            if json == csv {
                return Err(format!(
                    "json_output and csv_output point at the same file: {}",
                    json.display()
                ));
            }
        }
        Ok(())
    }
}
