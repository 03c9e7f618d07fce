//! Statistics collection
//!
//! Each worker owns a `WorkerStats` while it runs and hands it back to the
//! coordinator when its chunks are done; workers never share mutable
//! statistics state. The aggregator merges the per-worker views into a single
//! run-level view.

pub mod aggregator;
pub mod histogram;

use histogram::LatencyHistogram;
use std::time::Duration;

/// Statistics collected by a single worker
///
/// One latency sample is recorded per processed chunk (per pass), alongside
/// running totals of records and chunks.
#[derive(Debug)]
pub struct WorkerStats {
    /// Total records transformed
    records_processed: u64,

    /// Total chunks completed
    chunks_processed: u64,

    /// Time spent inside the burn loop, summed over chunks
    busy_time: Duration,

    /// Per-chunk processing latency
    chunk_latency: LatencyHistogram,
}

impl WorkerStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self {
            records_processed: 0,
            chunks_processed: 0,
            busy_time: Duration::ZERO,
            chunk_latency: LatencyHistogram::new(),
        }
    }

    /// Record one completed chunk
    pub fn record_chunk(&mut self, records: u64, elapsed: Duration) {
        self.records_processed += records;
        self.chunks_processed += 1;
        self.busy_time += elapsed;
        self.chunk_latency.record(elapsed);
    }

    /// Total records transformed
    pub fn records_processed(&self) -> u64 {
        self.records_processed
    }

    /// Total chunks completed
    pub fn chunks_processed(&self) -> u64 {
        self.chunks_processed
    }

    /// Time spent inside burn loops
    pub fn busy_time(&self) -> Duration {
        self.busy_time
    }

    /// Per-chunk latency histogram
    pub fn chunk_latency(&self) -> &LatencyHistogram {
        &self.chunk_latency
    }

    /// Merge another worker's statistics into this one
    pub fn merge(&mut self, other: &WorkerStats) -> crate::Result<()> {
        self.records_processed += other.records_processed;
        self.chunks_processed += other.chunks_processed;
        self.busy_time += other.busy_time;
        self.chunk_latency.merge(&other.chunk_latency)?;
        Ok(())
    }
}

impl Default for WorkerStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_chunk_accumulates() {
        let mut stats = WorkerStats::new();
        stats.record_chunk(100, Duration::from_millis(5));
        stats.record_chunk(50, Duration::from_millis(3));

        assert_eq!(stats.records_processed(), 150);
        assert_eq!(stats.chunks_processed(), 2);
        assert_eq!(stats.busy_time(), Duration::from_millis(8));
        assert_eq!(stats.chunk_latency().len(), 2);
    }

    #[test]
    fn test_merge() {
        let mut a = WorkerStats::new();
        a.record_chunk(10, Duration::from_millis(1));

        let mut b = WorkerStats::new();
        b.record_chunk(20, Duration::from_millis(2));

        a.merge(&b).unwrap();
        assert_eq!(a.records_processed(), 30);
        assert_eq!(a.chunks_processed(), 2);
        assert_eq!(a.chunk_latency().len(), 2);
    }
}
