//! Latency histogram using HdrHistogram
//!
//! Tracks per-chunk processing latencies with high precision and constant-time
//! recording. One sample is recorded per chunk per pass, so percentiles over a
//! run describe how evenly the partitioned work behaved across workers.

use crate::Result;
use hdrhistogram::Histogram;
use std::time::Duration;

/// Latency histogram wrapper
///
/// Configured to track latencies from 1 nanosecond to 1 hour with 3
/// significant digits of precision (values accurate to within 0.1%, ~2KB of
/// memory per histogram).
#[derive(Debug)]
pub struct LatencyHistogram {
    histogram: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new, empty latency histogram
    pub fn new() -> Self {
        let histogram = Histogram::new_with_bounds(1, 3_600_000_000_000, 3)
            .expect("Failed to create histogram with valid bounds");

        Self { histogram }
    }

    /// Record a latency sample
    ///
    /// Values outside the tracked range are clamped to the nearest bound.
    #[inline]
    pub fn record(&mut self, latency: Duration) {
        let nanos = latency.as_nanos() as u64;
        let value = nanos.clamp(1, 3_600_000_000_000);
        let _ = self.histogram.record(value);
    }

    /// Latency at the given percentile (0.0 - 100.0), or None if empty
    pub fn percentile(&self, percentile: f64) -> Option<Duration> {
        if self.histogram.len() == 0 {
            return None;
        }
        Some(Duration::from_nanos(
            self.histogram.value_at_percentile(percentile),
        ))
    }

    /// Minimum recorded latency, or None if empty
    pub fn min(&self) -> Option<Duration> {
        if self.histogram.len() == 0 {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.min()))
    }

    /// Maximum recorded latency, or None if empty
    pub fn max(&self) -> Option<Duration> {
        if self.histogram.len() == 0 {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.max()))
    }

    /// Mean recorded latency, or None if empty
    pub fn mean(&self) -> Option<Duration> {
        if self.histogram.len() == 0 {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.mean() as u64))
    }

    /// Number of samples recorded
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    /// True if no samples have been recorded
    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }

    /// Merge another histogram's samples into this one
    ///
    /// Used when aggregating statistics from multiple workers.
    pub fn merge(&mut self, other: &LatencyHistogram) -> Result<()> {
        self.histogram
            .add(&other.histogram)
            .map_err(|e| anyhow::anyhow!("Failed to merge histograms: {}", e))?;
        Ok(())
    }

    /// Clear all recorded samples
    pub fn reset(&mut self) {
        self.histogram.reset();
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}
