//! Structure-of-arrays column storage
//!
//! `ColumnArena` keeps the dataset as four parallel `f64` buffers of equal
//! length, addressable by record index. Workers never see the arena itself:
//! [`ColumnArena::views_mut`] carves it into disjoint [`ColumnView`]s, one per
//! chunk, and each view exposes only the slice `[start, end)` of every column.
//!
//! The views are produced with `split_at_mut`, so the borrow checker enforces
//! the disjoint-range-write contract: two workers cannot hold mutable access
//! to the same index, and a worker cannot reach outside its assigned range.
//! No locking is used anywhere in this module.

use crate::chunk::{ChunkError, ChunkSpec};
use crate::dataset::Record;

/// Structure-of-arrays storage: four parallel column buffers
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnArena {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    w: Vec<f64>,
}

impl ColumnArena {
    /// Arena of `len` records, all fields zero
    pub fn zeroed(len: usize) -> Self {
        Self {
            x: vec![0.0; len],
            y: vec![0.0; len],
            z: vec![0.0; len],
            w: vec![0.0; len],
        }
    }

    /// Build an arena holding the same data as an array-of-records slice
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            x: records.iter().map(|r| r.x).collect(),
            y: records.iter().map(|r| r.y).collect(),
            z: records.iter().map(|r| r.z).collect(),
            w: records.iter().map(|r| r.w).collect(),
        }
    }

    /// Number of records in the arena
    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// True if the arena holds no records
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Read back the record at `index`
    pub fn record(&self, index: usize) -> Option<Record> {
        if index >= self.len() {
            return None;
        }
        Some(Record {
            x: self.x[index],
            y: self.y[index],
            z: self.z[index],
            w: self.w[index],
        })
    }

    /// The `y` column, read-only (used by verification)
    pub fn y_column(&self) -> &[f64] {
        &self.y
    }

    /// Convert back to an array-of-records dataset
    pub fn to_records(&self) -> Vec<Record> {
        (0..self.len())
            .map(|i| Record {
                x: self.x[i],
                y: self.y[i],
                z: self.z[i],
                w: self.w[i],
            })
            .collect()
    }

    /// Carve the arena into disjoint mutable views, one per chunk
    ///
    /// Chunks must be in-bounds, sorted ascending and mutually disjoint (the
    /// shape [`crate::chunk::partition`] produces). Gaps between chunks are
    /// allowed; those indices are simply not reachable through any view.
    pub fn views_mut(&mut self, chunks: &[ChunkSpec]) -> Result<Vec<ColumnView<'_>>, ChunkError> {
        let len = self.len();
        let mut prev_end = 0;
        for (i, chunk) in chunks.iter().enumerate() {
            chunk.validate(len)?;
            if i > 0 && chunk.start < prev_end {
                return Err(ChunkError::Overlapping {
                    start: chunk.start,
                    end: chunk.end,
                    prev_end,
                });
            }
            prev_end = chunk.end;
        }

        let xs = carve(&mut self.x, chunks);
        let ys = carve(&mut self.y, chunks);
        let zs = carve(&mut self.z, chunks);
        let ws = carve(&mut self.w, chunks);

        let mut views = Vec::with_capacity(chunks.len());
        for (((chunk, x), (y, z)), w) in chunks
            .iter()
            .zip(xs)
            .zip(ys.into_iter().zip(zs))
            .zip(ws)
        {
            views.push(ColumnView {
                chunk: *chunk,
                x,
                y,
                z,
                w,
            });
        }
        Ok(views)
    }
}

/// Split one column into per-chunk mutable slices
///
/// Caller has already validated ordering and disjointness.
fn carve<'a>(mut column: &'a mut [f64], chunks: &[ChunkSpec]) -> Vec<&'a mut [f64]> {
    let mut pieces = Vec::with_capacity(chunks.len());
    let mut offset = 0;
    for chunk in chunks {
        let (_, rest) = column.split_at_mut(chunk.start - offset);
        let (piece, rest) = rest.split_at_mut(chunk.len());
        pieces.push(piece);
        column = rest;
        offset = chunk.end;
    }
    pieces
}

/// Mutable window over one chunk of the arena
///
/// Exposes exactly the columns' `[start, end)` slices and nothing else. Index
/// arguments on the accessors are chunk-relative.
#[derive(Debug)]
pub struct ColumnView<'a> {
    chunk: ChunkSpec,
    x: &'a mut [f64],
    y: &'a mut [f64],
    z: &'a mut [f64],
    w: &'a mut [f64],
}

impl ColumnView<'_> {
    /// The chunk this view was carved for
    pub fn chunk(&self) -> ChunkSpec {
        self.chunk
    }

    /// Number of records reachable through this view
    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// True if the view covers no records
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Read the record at chunk-relative `index`
    pub fn record(&self, index: usize) -> Option<Record> {
        if index >= self.len() {
            return None;
        }
        Some(Record {
            x: self.x[index],
            y: self.y[index],
            z: self.z[index],
            w: self.w[index],
        })
    }

    /// The view's slice of the `y` column, mutable (the hot path)
    #[inline]
    pub fn y_mut(&mut self) -> &mut [f64] {
        &mut *self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::partition;

    fn numbered_arena(len: usize) -> ColumnArena {
        let records: Vec<Record> = (0..len)
            .map(|i| Record {
                x: i as f64,
                y: i as f64 * 10.0,
                z: i as f64 * 100.0,
                w: i as f64 * 1000.0,
            })
            .collect();
        ColumnArena::from_records(&records)
    }

    #[test]
    fn test_from_records_preserves_fields() {
        let arena = numbered_arena(5);
        assert_eq!(arena.len(), 5);
        assert_eq!(
            arena.record(3),
            Some(Record {
                x: 3.0,
                y: 30.0,
                z: 300.0,
                w: 3000.0
            })
        );
        assert_eq!(arena.record(5), None);
    }

    #[test]
    fn test_views_cover_assigned_ranges_only() {
        let mut arena = numbered_arena(10);
        let chunks = partition(10, 3);
        let views = arena.views_mut(&chunks).unwrap();

        assert_eq!(views.len(), 3);
        for (view, chunk) in views.iter().zip(&chunks) {
            assert_eq!(view.chunk(), *chunk);
            assert_eq!(view.len(), chunk.len());
            // First record visible through the view is the chunk's first index
            assert_eq!(view.record(0).unwrap().x, chunk.start as f64);
        }
    }

    #[test]
    fn test_view_writes_land_in_arena() {
        let mut arena = ColumnArena::zeroed(8);
        let chunks = partition(8, 2);
        {
            let mut views = arena.views_mut(&chunks).unwrap();
            for view in &mut views {
                for y in view.y_mut() {
                    *y = 7.0;
                }
            }
        }
        assert!(arena.y_column().iter().all(|&y| y == 7.0));
    }

    #[test]
    fn test_views_leave_gap_indices_untouched() {
        let mut arena = ColumnArena::zeroed(10);
        let chunks = vec![ChunkSpec::new(0, 3), ChunkSpec::new(6, 10)];
        {
            let mut views = arena.views_mut(&chunks).unwrap();
            for view in &mut views {
                for y in view.y_mut() {
                    *y = 1.0;
                }
            }
        }
        let y = arena.y_column();
        assert!(y[0..3].iter().all(|&v| v == 1.0));
        assert!(y[3..6].iter().all(|&v| v == 0.0));
        assert!(y[6..10].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_views_reject_overlap() {
        let mut arena = ColumnArena::zeroed(10);
        let chunks = vec![ChunkSpec::new(0, 5), ChunkSpec::new(4, 10)];
        let err = arena.views_mut(&chunks).unwrap_err();
        assert_eq!(
            err,
            ChunkError::Overlapping {
                start: 4,
                end: 10,
                prev_end: 5
            }
        );
    }

    #[test]
    fn test_views_reject_out_of_bounds() {
        let mut arena = ColumnArena::zeroed(4);
        let chunks = vec![ChunkSpec::new(0, 5)];
        assert!(arena.views_mut(&chunks).is_err());
    }

    #[test]
    fn test_to_records_round_trip() {
        let arena = numbered_arena(6);
        let records = arena.to_records();
        assert_eq!(ColumnArena::from_records(&records), arena);
    }
}
