//! Statistics aggregation
//!
//! Merges per-worker statistics into a single aggregate view while keeping
//! the individual worker statistics available for per-worker reporting.

use crate::stats::WorkerStats;
use crate::Result;
use std::collections::BTreeMap;

/// Aggregates statistics from multiple workers
///
/// Workers are keyed by id; `aggregate()` merges all of them into one
/// `WorkerStats`. Per-worker entries stay accessible through `per_worker()`
/// in id order for stable output.
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    workers: BTreeMap<usize, WorkerStats>,
}

impl StatisticsAggregator {
    /// Create a new, empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add statistics from a worker
    ///
    /// A second submission under the same id replaces the first.
    pub fn add_worker(&mut self, worker_id: usize, stats: WorkerStats) {
        self.workers.insert(worker_id, stats);
    }

    /// Number of workers added
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Merge all worker statistics into a single view
    pub fn aggregate(&self) -> Result<WorkerStats> {
        let mut total = WorkerStats::new();
        for stats in self.workers.values() {
            total.merge(stats)?;
        }
        Ok(total)
    }

    /// Per-worker statistics in worker-id order
    pub fn per_worker(&self) -> impl Iterator<Item = (usize, &WorkerStats)> {
        self.workers.iter().map(|(id, stats)| (*id, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_aggregate_merges_all_workers() {
        let mut aggregator = StatisticsAggregator::new();

        let mut w0 = WorkerStats::new();
        w0.record_chunk(100, Duration::from_millis(2));
        aggregator.add_worker(0, w0);

        let mut w1 = WorkerStats::new();
        w1.record_chunk(200, Duration::from_millis(4));
        aggregator.add_worker(1, w1);

        assert_eq!(aggregator.num_workers(), 2);

        let total = aggregator.aggregate().unwrap();
        assert_eq!(total.records_processed(), 300);
        assert_eq!(total.chunks_processed(), 2);
        assert_eq!(total.chunk_latency().len(), 2);
    }

    #[test]
    fn test_per_worker_in_id_order() {
        let mut aggregator = StatisticsAggregator::new();
        aggregator.add_worker(2, WorkerStats::new());
        aggregator.add_worker(0, WorkerStats::new());
        aggregator.add_worker(1, WorkerStats::new());

        let ids: Vec<usize> = aggregator.per_worker().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_aggregate_empty() {
        let aggregator = StatisticsAggregator::new();
        let total = aggregator.aggregate().unwrap();
        assert_eq!(total.records_processed(), 0);
        assert_eq!(total.chunks_processed(), 0);
    }
}
