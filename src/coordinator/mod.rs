//! Coordinator module
//!
//! Orchestrates workers and aggregates results. The coordinator owns the
//! dataset for the whole run: it initializes every record before any worker
//! starts, partitions `[0, N)` into one chunk per worker thread, dispatches
//! the chunks, and waits for every completion signal before it reads
//! anything back. Chunks from [`crate::chunk::partition`] are disjoint and
//! covering, which is the precondition that makes the unsynchronized
//! column-arena writes safe.
//!
//! Per pass, dispatch differs by layout:
//!
//! - **records**: each worker gets an owned copy of its slice; the mutated
//!   copies are spliced back into the master dataset after all signals
//!   arrive. The copy cost is intentionally inside the measured window.
//! - **columns**: the arena is carved into disjoint views and workers write
//!   through them in place; nothing is copied back.

use crate::chunk::{partition, ChunkSpec};
use crate::config::{Config, DataLayout};
use crate::dataset::{zeroed_records, ColumnArena, Record};
use crate::stats::aggregator::StatisticsAggregator;
use crate::stats::WorkerStats;
use crate::util::verification::{self, VerificationOutcome};
use crate::worker::{CompletionSignal, Worker};
use crate::Result;
use crossbeam::channel::unbounded;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Results of one benchmark run over a single layout
#[derive(Debug)]
pub struct RunResults {
    /// Layout this run executed
    pub layout: DataLayout,
    /// Records in the dataset
    pub records: usize,
    /// Worker threads used
    pub threads: usize,
    /// Passes over the dataset
    pub passes: usize,
    /// Wall-clock time across all passes
    pub elapsed: Duration,
    /// Statistics merged across all workers
    pub aggregate: WorkerStats,
    /// Per-worker detail
    aggregator: StatisticsAggregator,
}

impl RunResults {
    /// Records transformed per second of wall-clock time
    pub fn records_per_sec(&self) -> f64 {
        crate::util::time::calculate_rate(self.aggregate.records_processed(), self.elapsed)
    }

    /// Per-worker statistics in worker-id order
    pub fn per_worker(&self) -> impl Iterator<Item = (usize, &WorkerStats)> {
        self.aggregator.per_worker()
    }
}

/// Coordinator that runs the configured benchmark
pub struct Coordinator {
    config: Arc<Config>,
}

impl Coordinator {
    /// Create a coordinator for the given configuration
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Run every layout the configuration selects, in order
    pub fn run(&self) -> Result<Vec<RunResults>> {
        let mut results = Vec::new();
        for layout in self.config.workload.layout.layouts() {
            let result = match layout {
                DataLayout::Records => self.run_records()?,
                DataLayout::Columns => self.run_columns()?,
            };
            results.push(result);
        }
        Ok(results)
    }

    /// One worker per chunk; worker `k` of a seeded run draws from
    /// `seed + k` so the run stays reproducible per worker.
    fn make_workers(&self, count: usize) -> Vec<Worker> {
        (0..count)
            .map(|id| match self.config.runtime.seed {
                Some(seed) => Worker::with_seed(id, seed.wrapping_add(id as u64)),
                None => Worker::new(id),
            })
            .collect()
    }

    /// Benchmark the array-of-records layout
    fn run_records(&self) -> Result<RunResults> {
        let records = self.config.dataset.records;
        let threads = self.config.workers.threads;
        let passes = self.config.workload.passes;

        let mut master = zeroed_records(records);
        let chunks = partition(records, threads);
        let mut workers = self.make_workers(threads);

        let run_start = Instant::now();
        for pass in 0..passes {
            if self.config.runtime.debug {
                eprintln!("DEBUG: records layout, pass {}/{}", pass + 1, passes);
            }
            self.run_records_pass(&mut master, &chunks, &mut workers)?;
        }
        let elapsed = run_start.elapsed();

        if self.config.runtime.verify {
            check_outcome(verification::verify_records(&master, passes))?;
        }

        self.finish(DataLayout::Records, workers, elapsed)
    }

    /// Benchmark the structure-of-arrays layout
    fn run_columns(&self) -> Result<RunResults> {
        let records = self.config.dataset.records;
        let threads = self.config.workers.threads;
        let passes = self.config.workload.passes;

        let mut arena = ColumnArena::zeroed(records);
        let chunks = partition(records, threads);
        let mut workers = self.make_workers(threads);

        let run_start = Instant::now();
        for pass in 0..passes {
            if self.config.runtime.debug {
                eprintln!("DEBUG: columns layout, pass {}/{}", pass + 1, passes);
            }
            self.run_columns_pass(&mut arena, &chunks, &mut workers)?;
        }
        let elapsed = run_start.elapsed();

        if self.config.runtime.verify {
            check_outcome(verification::verify_columns(&arena, passes))?;
        }

        self.finish(DataLayout::Columns, workers, elapsed)
    }

    /// One pass in records mode: cut copies, dispatch, await signals, splice
    /// the mutated copies back.
    fn run_records_pass(
        &self,
        master: &mut [Record],
        chunks: &[ChunkSpec],
        workers: &mut [Worker],
    ) -> Result<()> {
        let dataset_len = master.len();
        let (done_tx, done_rx) = unbounded::<CompletionSignal>();

        // Embedded copies are cut before any worker starts
        let tasks: Vec<(ChunkSpec, Vec<Record>)> = chunks
            .iter()
            .map(|chunk| (*chunk, master[chunk.start..chunk.end].to_vec()))
            .collect();

        let mut mutated: Vec<(ChunkSpec, Vec<Record>)> = Vec::with_capacity(chunks.len());
        std::thread::scope(|scope| -> Result<()> {
            let mut handles = Vec::with_capacity(chunks.len());
            for (worker, (chunk, mut copy)) in workers.iter_mut().zip(tasks) {
                let done = done_tx.clone();
                handles.push(scope.spawn(move || -> Result<(ChunkSpec, Vec<Record>)> {
                    worker.process_records(chunk, &mut copy, dataset_len, &done)?;
                    Ok((chunk, copy))
                }));
            }
            for handle in handles {
                let outcome = handle
                    .join()
                    .map_err(|_| anyhow::anyhow!("Worker thread panicked"))??;
                mutated.push(outcome);
            }
            Ok(())
        })?;
        drop(done_tx);

        expect_signals(&done_rx, chunks.len())?;

        // Copy-back makes the workers' mutations visible to the coordinator
        for (chunk, copy) in mutated {
            master[chunk.start..chunk.end].copy_from_slice(&copy);
        }
        Ok(())
    }

    /// One pass in columns mode: carve disjoint views, dispatch, await
    /// signals. Mutations land in the arena directly.
    fn run_columns_pass(
        &self,
        arena: &mut ColumnArena,
        chunks: &[ChunkSpec],
        workers: &mut [Worker],
    ) -> Result<()> {
        let (done_tx, done_rx) = unbounded::<CompletionSignal>();

        let views = arena.views_mut(chunks)?;
        std::thread::scope(|scope| -> Result<()> {
            let mut handles = Vec::with_capacity(chunks.len());
            for (worker, mut view) in workers.iter_mut().zip(views) {
                let done = done_tx.clone();
                handles.push(scope.spawn(move || worker.process_columns(&mut view, &done)));
            }
            for handle in handles {
                handle
                    .join()
                    .map_err(|_| anyhow::anyhow!("Worker thread panicked"))??;
            }
            Ok(())
        })?;
        drop(done_tx);

        expect_signals(&done_rx, chunks.len())
    }

    fn finish(
        &self,
        layout: DataLayout,
        workers: Vec<Worker>,
        elapsed: Duration,
    ) -> Result<RunResults> {
        let mut aggregator = StatisticsAggregator::new();
        for worker in workers {
            let id = worker.id();
            aggregator.add_worker(id, worker.into_stats());
        }
        let aggregate = aggregator.aggregate()?;

        Ok(RunResults {
            layout,
            records: self.config.dataset.records,
            threads: self.config.workers.threads,
            passes: self.config.workload.passes,
            elapsed,
            aggregate,
            aggregator,
        })
    }
}

/// Drain the completion channel and require exactly one `true` per chunk
fn expect_signals(
    done_rx: &crossbeam::channel::Receiver<CompletionSignal>,
    expected: usize,
) -> Result<()> {
    let signals = done_rx.try_iter().filter(|&signal| signal).count();
    if signals != expected {
        anyhow::bail!(
            "expected {} completion signals, received {}",
            expected,
            signals
        );
    }
    Ok(())
}

fn check_outcome(outcome: VerificationOutcome) -> Result<()> {
    match outcome {
        VerificationOutcome::Success => Ok(()),
        VerificationOutcome::Failure {
            index,
            field,
            value,
            detail,
        } => anyhow::bail!(
            "verification failed at record {} field {}: value {} ({})",
            index,
            field,
            value,
            detail
        ),
    }
}
