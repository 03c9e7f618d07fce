//! Worker unit
//!
//! A worker receives one chunk at a time and applies the burn transformation
//! sequentially over its assigned range. The loop is a tight, synchronous
//! pass from the first index to the last; there is no concurrency inside a
//! worker. When (and only when) every record in the chunk has been mutated,
//! the worker emits a single `true` completion signal on its channel.
//!
//! Two data handles exist, matching the two layouts:
//!
//! - **Records**: an owned copy of the chunk's records, mutated in place and
//!   handed back to the coordinator by value after the signal.
//! - **Columns**: a [`ColumnView`] into the shared arena; mutations are
//!   visible to the coordinator without any copy.
//!
//! A malformed chunk descriptor (inverted range, out-of-bounds end, copy whose
//! length disagrees with the chunk) fails the worker unit with a descriptive
//! error before any record is touched, and no completion signal is sent.
//!
//! # Thread Safety
//!
//! Each worker owns its sampler and statistics and is designed to run in its
//! own thread. Workers communicate only through the completion channel and the
//! statistics they return.

use crate::chunk::ChunkSpec;
use crate::compute::ExponentSampler;
use crate::dataset::{ColumnView, Record};
use crate::stats::WorkerStats;
use crate::Result;
use anyhow::Context;
use crossbeam::channel::Sender;
use std::time::Instant;

/// The completion signal sent once per processed chunk
pub type CompletionSignal = bool;

/// Worker that executes the burn loop over assigned chunks
pub struct Worker {
    /// Worker ID (for identification in multi-worker runs)
    id: usize,

    /// Exponent source for the per-record delta
    sampler: ExponentSampler,

    /// Statistics collector
    stats: WorkerStats,
}

impl Worker {
    /// Create a worker with an entropy-seeded sampler
    pub fn new(id: usize) -> Self {
        Self {
            id,
            sampler: ExponentSampler::new(),
            stats: WorkerStats::new(),
        }
    }

    /// Create a worker with a specific sampler seed
    ///
    /// The coordinator derives per-worker seeds (`base seed + worker id`) so
    /// seeded multi-threaded runs stay reproducible.
    pub fn with_seed(id: usize, seed: u64) -> Self {
        Self {
            id,
            sampler: ExponentSampler::with_seed(seed),
            stats: WorkerStats::new(),
        }
    }

    /// Worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Process a chunk in array-of-records mode
    ///
    /// `records` is the embedded copy cut for `chunk`; it must hold exactly
    /// `chunk.len()` records. `dataset_len` is the length of the dataset the
    /// chunk indexes into. Every record's `y` gains a fresh factorial delta;
    /// the completion signal goes out after the last record.
    pub fn process_records(
        &mut self,
        chunk: ChunkSpec,
        records: &mut [Record],
        dataset_len: usize,
        done: &Sender<CompletionSignal>,
    ) -> Result<()> {
        chunk
            .validate(dataset_len)
            .with_context(|| format!("Worker {} rejected chunk {}", self.id, chunk))?;
        chunk
            .validate_handle(records.len())
            .with_context(|| format!("Worker {} rejected record copy for chunk {}", self.id, chunk))?;

        let start = Instant::now();
        for record in records.iter_mut() {
            record.y += self.sampler.next_delta();
        }
        let elapsed = start.elapsed();

        self.stats.record_chunk(chunk.len() as u64, elapsed);
        done.send(true)
            .with_context(|| format!("Worker {} completion channel closed", self.id))?;
        Ok(())
    }

    /// Process a chunk in structure-of-arrays mode
    ///
    /// The view was carved for its chunk by the arena, which already enforced
    /// bounds and disjointness; the worker can only reach `[start, end)`.
    pub fn process_columns(
        &mut self,
        view: &mut ColumnView<'_>,
        done: &Sender<CompletionSignal>,
    ) -> Result<()> {
        let chunk = view.chunk();

        let start = Instant::now();
        for y in view.y_mut() {
            *y += self.sampler.next_delta();
        }
        let elapsed = start.elapsed();

        self.stats.record_chunk(chunk.len() as u64, elapsed);
        done.send(true)
            .with_context(|| format!("Worker {} completion channel closed", self.id))?;
        Ok(())
    }

    /// Consume the worker and return its statistics
    pub fn into_stats(self) -> WorkerStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute;
    use crate::dataset::{zeroed_records, ColumnArena};
    use crossbeam::channel::unbounded;

    #[test]
    fn test_records_mode_mutates_y_only() {
        let mut worker = Worker::with_seed(0, 42);
        let (tx, rx) = unbounded();

        let chunk = ChunkSpec::new(2, 8);
        let mut copy = zeroed_records(chunk.len());
        worker.process_records(chunk, &mut copy, 10, &tx).unwrap();

        let (lo, hi) = (compute::min_delta(), compute::max_delta());
        for record in &copy {
            assert!(record.y.is_finite());
            assert!(record.y >= lo && record.y <= hi);
            assert_eq!(record.x, 0.0);
            assert_eq!(record.z, 0.0);
            assert_eq!(record.w, 0.0);
        }

        // Exactly one completion signal, and it is the literal `true`
        assert_eq!(rx.try_recv(), Ok(true));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_records_mode_rejects_out_of_bounds() {
        let mut worker = Worker::with_seed(0, 42);
        let (tx, rx) = unbounded();

        let chunk = ChunkSpec::new(5, 15);
        let mut copy = zeroed_records(chunk.len());
        let err = worker.process_records(chunk, &mut copy, 10, &tx);

        assert!(err.is_err());
        // No mutation and no signal on a rejected chunk
        assert!(copy.iter().all(|r| r.y == 0.0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_records_mode_rejects_inverted_chunk() {
        let mut worker = Worker::new(0);
        let (tx, rx) = unbounded();

        let mut copy = zeroed_records(0);
        assert!(worker
            .process_records(ChunkSpec::new(7, 3), &mut copy, 10, &tx)
            .is_err());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_records_mode_rejects_mismatched_copy() {
        let mut worker = Worker::new(0);
        let (tx, rx) = unbounded();

        let chunk = ChunkSpec::new(0, 4);
        let mut copy = zeroed_records(3); // one record short
        assert!(worker.process_records(chunk, &mut copy, 10, &tx).is_err());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_columns_mode_mutates_shared_arena() {
        let mut arena = ColumnArena::zeroed(10);
        let chunks = vec![ChunkSpec::new(0, 10)];
        let (tx, rx) = unbounded();

        let mut worker = Worker::with_seed(0, 7);
        {
            let mut views = arena.views_mut(&chunks).unwrap();
            worker.process_columns(&mut views[0], &tx).unwrap();
        }

        let (lo, hi) = (compute::min_delta(), compute::max_delta());
        for i in 0..10 {
            let record = arena.record(i).unwrap();
            assert!(record.y >= lo && record.y <= hi);
            assert_eq!(record.x, 0.0);
            assert_eq!(record.z, 0.0);
            assert_eq!(record.w, 0.0);
        }
        assert_eq!(rx.try_recv(), Ok(true));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_columns_mode_touches_only_assigned_range() {
        let mut arena = ColumnArena::zeroed(10);
        let chunks = vec![ChunkSpec::new(3, 7)];
        let (tx, _rx) = unbounded();

        let mut worker = Worker::with_seed(0, 9);
        {
            let mut views = arena.views_mut(&chunks).unwrap();
            worker.process_columns(&mut views[0], &tx).unwrap();
        }

        let y = arena.y_column();
        assert!(y[0..3].iter().all(|&v| v == 0.0));
        assert!(y[3..7].iter().all(|&v| v > 0.0));
        assert!(y[7..10].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_chunk_still_signals_once() {
        let mut worker = Worker::new(0);
        let (tx, rx) = unbounded();

        let chunk = ChunkSpec::new(5, 5);
        let mut copy = zeroed_records(0);
        worker.process_records(chunk, &mut copy, 10, &tx).unwrap();

        assert_eq!(rx.try_recv(), Ok(true));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_stats_accumulate_across_chunks() {
        let mut worker = Worker::with_seed(0, 1);
        let (tx, _rx) = unbounded();

        let mut copy_a = zeroed_records(4);
        let mut copy_b = zeroed_records(6);
        worker
            .process_records(ChunkSpec::new(0, 4), &mut copy_a, 10, &tx)
            .unwrap();
        worker
            .process_records(ChunkSpec::new(4, 10), &mut copy_b, 10, &tx)
            .unwrap();

        let stats = worker.into_stats();
        assert_eq!(stats.records_processed(), 10);
        assert_eq!(stats.chunks_processed(), 2);
        assert_eq!(stats.chunk_latency().len(), 2);
    }
}
