//! Dataset verification utilities
//!
//! After a full run over a zero-initialized dataset, every record must obey
//! a small set of invariants: its `y` field holds the sum of one factorial
//! delta per pass (finite, positive, bounded by the sampled factorial range),
//! and the untouched `x`, `z`, `w` fields are still zero. The scan is
//! embarrassingly parallel, so it runs over rayon.
//!
//! The exact `y` values are not checkable (the exponents are random), so
//! verification asserts the bounds, not the values.

use crate::compute;
use crate::dataset::{ColumnArena, Record};
use rayon::prelude::*;

/// Verification result
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    /// Every record satisfies the post-run invariants
    Success,
    /// First violation found
    Failure {
        /// Record index of the violation
        index: usize,
        /// Offending field name
        field: &'static str,
        /// The value found
        value: f64,
        /// What was expected
        detail: String,
    },
}

impl VerificationOutcome {
    /// True if verification passed
    pub fn is_success(&self) -> bool {
        matches!(self, VerificationOutcome::Success)
    }
}

/// Expected bounds for a `y` field after `passes` full passes
fn y_bounds(passes: usize) -> (f64, f64) {
    let passes = passes as f64;
    (passes * compute::min_delta(), passes * compute::max_delta())
}

fn check_record(index: usize, record: &Record, lo: f64, hi: f64) -> Option<VerificationOutcome> {
    if !record.y.is_finite() || record.y < lo || record.y > hi {
        return Some(VerificationOutcome::Failure {
            index,
            field: "y",
            value: record.y,
            detail: format!("expected a finite value in [{:e}, {:e}]", lo, hi),
        });
    }
    for (field, value) in [("x", record.x), ("z", record.z), ("w", record.w)] {
        if value != 0.0 {
            return Some(VerificationOutcome::Failure {
                index,
                field,
                value,
                detail: "expected untouched field to remain 0".to_string(),
            });
        }
    }
    None
}

/// Verify an array-of-records dataset after `passes` full passes
///
/// Assumes the dataset started zeroed and every index was processed once per
/// pass, which is what the coordinator guarantees.
pub fn verify_records(records: &[Record], passes: usize) -> VerificationOutcome {
    let (lo, hi) = y_bounds(passes);
    records
        .par_iter()
        .enumerate()
        .find_map_any(|(index, record)| check_record(index, record, lo, hi))
        .unwrap_or(VerificationOutcome::Success)
}

/// Verify a column arena after `passes` full passes
pub fn verify_columns(arena: &ColumnArena, passes: usize) -> VerificationOutcome {
    let (lo, hi) = y_bounds(passes);
    (0..arena.len())
        .into_par_iter()
        .find_map_any(|index| {
            let record = arena.record(index).expect("index in bounds");
            check_record(index, &record, lo, hi)
        })
        .unwrap_or(VerificationOutcome::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::ExponentSampler;
    use crate::dataset::zeroed_records;

    fn processed_records(len: usize, passes: usize) -> Vec<Record> {
        let mut records = zeroed_records(len);
        let mut sampler = ExponentSampler::with_seed(3);
        for _ in 0..passes {
            for record in &mut records {
                record.y += sampler.next_delta();
            }
        }
        records
    }

    #[test]
    fn test_verify_records_accepts_processed_dataset() {
        let records = processed_records(100, 2);
        assert_eq!(verify_records(&records, 2), VerificationOutcome::Success);
    }

    #[test]
    fn test_verify_records_rejects_unprocessed_y() {
        let mut records = processed_records(10, 1);
        records[4].y = 0.0;
        let outcome = verify_records(&records, 1);
        assert!(matches!(
            outcome,
            VerificationOutcome::Failure {
                index: 4,
                field: "y",
                ..
            }
        ));
    }

    #[test]
    fn test_verify_records_rejects_touched_x() {
        let mut records = processed_records(10, 1);
        records[7].x = 1.0;
        let outcome = verify_records(&records, 1);
        assert!(matches!(
            outcome,
            VerificationOutcome::Failure {
                index: 7,
                field: "x",
                ..
            }
        ));
    }

    #[test]
    fn test_verify_records_rejects_infinite_y() {
        let mut records = processed_records(10, 1);
        records[0].y = f64::INFINITY;
        assert!(!verify_records(&records, 1).is_success());
    }

    #[test]
    fn test_verify_columns_matches_records_verdict() {
        let records = processed_records(50, 3);
        let arena = ColumnArena::from_records(&records);
        assert_eq!(verify_columns(&arena, 3), VerificationOutcome::Success);
    }

    #[test]
    fn test_verify_columns_reports_violation_index() {
        let mut records = processed_records(20, 1);
        records[13].w = -2.5;
        let arena = ColumnArena::from_records(&records);
        assert!(matches!(
            verify_columns(&arena, 1),
            VerificationOutcome::Failure {
                index: 13,
                field: "w",
                ..
            }
        ));
    }
}
