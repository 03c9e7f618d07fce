//! JSON report formatting
//!
//! Serializes run results into a single report file: one entry per layout,
//! an optional layout comparison, and a UTC timestamp identifying the run.

use crate::config::{Config, DataLayout};
use crate::coordinator::RunResults;
use crate::output::text::Comparison;
use crate::stats::histogram::LatencyHistogram;
use crate::util::time::format_duration;
use crate::Result;
use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            micros: d.as_micros() as u64,
            human: format_duration(d),
        }
    }
}

/// Latency statistics with percentiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonLatency {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<JsonDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<JsonDuration>,
    pub mean: JsonDuration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p50: Option<JsonDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p90: Option<JsonDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p95: Option<JsonDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p99: Option<JsonDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p99_9: Option<JsonDuration>,
}

impl JsonLatency {
    /// Build from a histogram; None if the histogram is empty
    pub fn from_histogram(hist: &LatencyHistogram) -> Option<Self> {
        let mean = hist.mean()?;
        Some(Self {
            min: hist.min().map(JsonDuration::from_duration),
            max: hist.max().map(JsonDuration::from_duration),
            mean: JsonDuration::from_duration(mean),
            p50: hist.percentile(50.0).map(JsonDuration::from_duration),
            p90: hist.percentile(90.0).map(JsonDuration::from_duration),
            p95: hist.percentile(95.0).map(JsonDuration::from_duration),
            p99: hist.percentile(99.0).map(JsonDuration::from_duration),
            p99_9: hist.percentile(99.9).map(JsonDuration::from_duration),
        })
    }
}

/// Per-worker detail row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonWorker {
    pub worker_id: usize,
    pub records_processed: u64,
    pub chunks_processed: u64,
    pub busy: JsonDuration,
}

/// One benchmark run (one layout)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRun {
    pub layout: DataLayout,
    pub records: usize,
    pub threads: usize,
    pub passes: usize,
    pub elapsed: JsonDuration,
    pub records_per_sec: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_latency: Option<JsonLatency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_worker: Option<Vec<JsonWorker>>,
}

/// Throughput comparison between two layouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonComparison {
    pub faster: DataLayout,
    pub slower: DataLayout,
    pub speedup: f64,
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// RFC 3339 UTC timestamp of report generation
    pub generated_at: String,
    pub runs: Vec<JsonRun>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<JsonComparison>,
}

/// Build the report structure from run results
pub fn build_report(results: &[RunResults], config: &Config) -> JsonReport {
    let runs = results
        .iter()
        .map(|run| JsonRun {
            layout: run.layout,
            records: run.records,
            threads: run.threads,
            passes: run.passes,
            elapsed: JsonDuration::from_duration(run.elapsed),
            records_per_sec: run.records_per_sec(),
            chunk_latency: JsonLatency::from_histogram(run.aggregate.chunk_latency()),
            per_worker: config.output.per_worker_output.then(|| {
                run.per_worker()
                    .map(|(id, stats)| JsonWorker {
                        worker_id: id,
                        records_processed: stats.records_processed(),
                        chunks_processed: stats.chunks_processed(),
                        busy: JsonDuration::from_duration(stats.busy_time()),
                    })
                    .collect()
            }),
        })
        .collect();

    let comparison = Comparison::from_results(results).map(|c| JsonComparison {
        faster: c.faster,
        slower: c.slower,
        speedup: c.speedup,
    });

    JsonReport {
        generated_at: Utc::now().to_rfc3339(),
        runs,
        comparison,
    }
}

/// Write a report to `path` as pretty-printed JSON
pub fn write_report(path: &Path, report: &JsonReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON report: {}", path.display()))?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
    Ok(())
}
