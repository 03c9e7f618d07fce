//! Chunk descriptors and range partitioning
//!
//! A chunk is a half-open index range `[start, end)` over the dataset. The
//! coordinator partitions `[0, N)` into contiguous disjoint chunks, one per
//! worker, and each worker processes only the indices inside its chunk.
//!
//! Disjointness is what makes unsynchronized concurrent writes into the shared
//! column arena safe, so chunk validation happens before any worker touches
//! data: a malformed descriptor fails the worker unit with a descriptive
//! error instead of corrupting memory.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error raised for a malformed chunk descriptor
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("chunk start {start} is greater than chunk end {end}")]
    Inverted { start: usize, end: usize },

    #[error("chunk [{start}, {end}) exceeds dataset length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("data handle holds {handle_len} records but chunk [{start}, {end}) needs {expected}")]
    LengthMismatch {
        start: usize,
        end: usize,
        expected: usize,
        handle_len: usize,
    },

    #[error("chunk [{start}, {end}) overlaps or precedes an earlier chunk ending at {prev_end}")]
    Overlapping {
        start: usize,
        end: usize,
        prev_end: usize,
    },
}

/// Half-open index range `[start, end)` assigned to a single worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSpec {
    /// First index to process (inclusive)
    pub start: usize,
    /// One past the last index to process (exclusive)
    pub end: usize,
}

impl ChunkSpec {
    /// Create a chunk descriptor
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of records covered by this chunk
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True if the chunk covers no records
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check the descriptor against a dataset of `len` records
    ///
    /// Rejects inverted ranges and ranges reaching past the end of the
    /// dataset. An empty chunk (`start == end`) is valid and processes
    /// nothing.
    pub fn validate(&self, len: usize) -> Result<(), ChunkError> {
        if self.start > self.end {
            return Err(ChunkError::Inverted {
                start: self.start,
                end: self.end,
            });
        }
        if self.end > len {
            return Err(ChunkError::OutOfBounds {
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(())
    }

    /// Check that a data handle of `handle_len` records matches this chunk
    ///
    /// Used in array mode, where the worker receives an embedded copy that
    /// must line up exactly with the chunk it was cut for.
    pub fn validate_handle(&self, handle_len: usize) -> Result<(), ChunkError> {
        if handle_len != self.len() {
            return Err(ChunkError::LengthMismatch {
                start: self.start,
                end: self.end,
                expected: self.len(),
                handle_len,
            });
        }
        Ok(())
    }

    /// True if this chunk shares no index with `other`
    pub fn is_disjoint(&self, other: &ChunkSpec) -> bool {
        self.end <= other.start || other.end <= self.start
    }
}

impl fmt::Display for ChunkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Partition `[0, len)` into `parts` contiguous disjoint chunks
///
/// Chunk sizes differ by at most one record: the first `len % parts` chunks
/// take the extra record. Together the chunks cover `[0, len)` exactly, so no
/// index is processed twice or skipped.
///
/// With `len < parts` the tail chunks come out empty; the coordinator still
/// dispatches them so the completion count stays one signal per chunk.
pub fn partition(len: usize, parts: usize) -> Vec<ChunkSpec> {
    assert!(parts > 0, "cannot partition into zero chunks");

    let base = len / parts;
    let remainder = len % parts;

    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = if i < remainder { base + 1 } else { base };
        chunks.push(ChunkSpec::new(start, start + size));
        start += size;
    }
    chunks
}
