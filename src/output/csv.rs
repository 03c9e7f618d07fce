//! CSV report formatting
//!
//! One row per run in aggregate mode, or one row per worker per run when
//! per-worker output is enabled. CSV is the format spreadsheet and pandas
//! users reach for, so the columns stay flat and unit-suffixed.

use crate::config::Config;
use crate::coordinator::RunResults;
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// CSV writer for run results
pub struct CsvWriter {
    file: File,
    per_worker: bool,
}

impl CsvWriter {
    /// Create a writer and emit the header row
    pub fn new(path: &Path, per_worker: bool) -> Result<Self> {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create CSV report: {}", path.display()))?;

        if per_worker {
            writeln!(
                file,
                "layout,worker_id,records_processed,chunks_processed,busy_sec,mean_chunk_us"
            )?;
        } else {
            writeln!(
                file,
                "layout,records,threads,passes,elapsed_sec,records_per_sec,chunks,mean_chunk_us,p99_chunk_us"
            )?;
        }

        Ok(Self { file, per_worker })
    }

    /// Append rows for one run
    pub fn append_run(&mut self, run: &RunResults) -> Result<()> {
        if self.per_worker {
            for (id, stats) in run.per_worker() {
                let mean_us = stats
                    .chunk_latency()
                    .mean()
                    .map(|d| d.as_micros() as u64)
                    .unwrap_or(0);
                writeln!(
                    self.file,
                    "{},{},{},{},{:.6},{}",
                    run.layout,
                    id,
                    stats.records_processed(),
                    stats.chunks_processed(),
                    stats.busy_time().as_secs_f64(),
                    mean_us
                )?;
            }
        } else {
            let hist = run.aggregate.chunk_latency();
            let mean_us = hist.mean().map(|d| d.as_micros() as u64).unwrap_or(0);
            let p99_us = hist
                .percentile(99.0)
                .map(|d| d.as_micros() as u64)
                .unwrap_or(0);
            writeln!(
                self.file,
                "{},{},{},{},{:.6},{:.2},{},{},{}",
                run.layout,
                run.records,
                run.threads,
                run.passes,
                run.elapsed.as_secs_f64(),
                run.records_per_sec(),
                run.aggregate.chunks_processed(),
                mean_us,
                p99_us
            )?;
        }
        Ok(())
    }
}

/// Write all run results to a CSV file
pub fn write_report(path: &Path, results: &[RunResults], config: &Config) -> Result<()> {
    let mut writer = CsvWriter::new(path, config.output.per_worker_output)?;
    for run in results {
        writer.append_run(run)?;
    }
    Ok(())
}
