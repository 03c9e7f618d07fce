//! Human-readable text output

use crate::config::{Config, DataLayout};
use crate::coordinator::RunResults;
use crate::util::time::{format_duration, format_rate};

/// Print run results to the console
///
/// Shows per-layout throughput, and when both layouts ran, a comparison of
/// the two. Latency statistics and per-worker rows are gated on the output
/// configuration.
pub fn print_results(results: &[RunResults], config: &Config) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    BENCHMARK RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for run in results {
        print_run(run, config);
        println!();
    }

    if let Some(comparison) = Comparison::from_results(results) {
        println!("Comparison:");
        println!(
            "  {} is {:.2}x the throughput of {}",
            comparison.faster, comparison.speedup, comparison.slower
        );
        println!();
    }
}

fn print_run(run: &RunResults, config: &Config) {
    // Higher verbosity implies the optional sections
    let show_latency = config.output.show_latency || config.output.verbosity >= 1;
    let show_percentiles = config.output.show_percentiles || config.output.verbosity >= 2;
    let per_worker = config.output.per_worker_output || config.output.verbosity >= 2;

    println!("Layout: {}", run.layout);
    println!(
        "  Records: {} x {} pass(es), {} worker(s)",
        run.records, run.passes, run.threads
    );
    println!("  Elapsed: {}", format_duration(run.elapsed));
    println!(
        "  Throughput: {} records/s",
        format_rate(run.records_per_sec())
    );

    if show_latency || show_percentiles {
        let hist = run.aggregate.chunk_latency();
        if !hist.is_empty() {
            println!();
            println!("  Chunk latency:");
            if let (Some(min), Some(mean), Some(max)) = (hist.min(), hist.mean(), hist.max()) {
                println!("    Min:  {}", format_duration(min));
                println!("    Mean: {}", format_duration(mean));
                println!("    Max:  {}", format_duration(max));
            }

            if show_percentiles {
                println!();
                println!("    Percentiles:");
                for &p in &[50.0, 90.0, 95.0, 99.0, 99.9] {
                    if let Some(val) = hist.percentile(p) {
                        println!("      p{:5.2}: {}", p, format_duration(val));
                    }
                }
            }
        }
    }

    if per_worker {
        println!();
        println!("  Per-worker:");
        for (id, stats) in run.per_worker() {
            let mean = stats
                .chunk_latency()
                .mean()
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string());
            println!(
                "    worker {:>3}: {} records in {} chunk(s), mean chunk {}",
                id,
                stats.records_processed(),
                stats.chunks_processed(),
                mean
            );
        }
    }
}

/// Throughput comparison between the two layouts of a `both` run
pub struct Comparison {
    pub faster: DataLayout,
    pub slower: DataLayout,
    pub speedup: f64,
}

impl Comparison {
    /// Build a comparison when exactly two layouts were run
    pub fn from_results(results: &[RunResults]) -> Option<Self> {
        if results.len() != 2 {
            return None;
        }
        let (a, b) = (&results[0], &results[1]);
        let (rate_a, rate_b) = (a.records_per_sec(), b.records_per_sec());
        if rate_a <= 0.0 || rate_b <= 0.0 {
            return None;
        }
        if rate_a >= rate_b {
            Some(Self {
                faster: a.layout,
                slower: b.layout,
                speedup: rate_a / rate_b,
            })
        } else {
            Some(Self {
                faster: b.layout,
                slower: a.layout,
                speedup: rate_b / rate_a,
            })
        }
    }
}
