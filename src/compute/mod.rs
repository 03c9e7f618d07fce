//! CPU-burn kernel
//!
//! The per-record transformation is deliberately wasteful: every record draws
//! a random exponent in `[95, 104]` and adds `factorial(exponent)` to its `y`
//! field. Factorials of that size are far beyond the range where an `f64` can
//! represent integers exactly, so the delta is an approximation, and that is
//! fine: the benchmark measures iteration and call overhead across memory
//! layouts, not arithmetic accuracy. The recursive form is kept unbounded
//! and unmemoized so every record pays the full call chain.

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Smallest exponent the sampler can draw (inclusive)
pub const EXPONENT_MIN: u64 = 95;

/// Largest exponent the sampler can draw (inclusive)
pub const EXPONENT_MAX: u64 = 104;

/// Recursive factorial over `f64`
///
/// `factorial(0) == factorial(1) == 1`. Above `n = 170` the result saturates
/// to `f64::INFINITY`; the sampler never draws that high, but the function
/// itself carries no guard.
pub fn factorial(n: u64) -> f64 {
    if n <= 1 {
        1.0
    } else {
        n as f64 * factorial(n - 1)
    }
}

/// Uniform sampler for the per-record factorial exponent
///
/// Uses xoshiro256++, which is fast enough that the factorial call chain
/// dominates each sample. Seedable for reproducible runs and tests.
pub struct ExponentSampler {
    rng: Xoshiro256PlusPlus,
}

impl ExponentSampler {
    /// Sampler seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Sampler with a specific seed
    ///
    /// Useful for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Draw the next exponent, uniform over `[EXPONENT_MIN, EXPONENT_MAX]`
    #[inline]
    pub fn next_exponent(&mut self) -> u64 {
        self.rng.gen_range(EXPONENT_MIN..=EXPONENT_MAX)
    }

    /// Draw the next delta: `factorial` of a fresh exponent
    #[inline]
    pub fn next_delta(&mut self) -> f64 {
        factorial(self.next_exponent())
    }
}

impl Default for ExponentSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest delta a single transformation can add
pub fn min_delta() -> f64 {
    factorial(EXPONENT_MIN)
}

/// Largest delta a single transformation can add
pub fn max_delta() -> f64 {
    factorial(EXPONENT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial_base_cases() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
    }

    #[test]
    fn test_factorial_exact_below_precision_cliff() {
        assert_eq!(factorial(5), 120.0);
        assert_eq!(factorial(10), 3_628_800.0);
    }

    #[test]
    fn test_factorial_finite_over_sampled_range() {
        for n in EXPONENT_MIN..=EXPONENT_MAX {
            let value = factorial(n);
            assert!(value.is_finite());
            assert!(value > 0.0);
        }
        // Strictly increasing across the sampled range
        assert!(max_delta() > min_delta());
    }

    #[test]
    fn test_sampler_stays_in_range() {
        let mut sampler = ExponentSampler::with_seed(42);
        for _ in 0..1000 {
            let exp = sampler.next_exponent();
            assert!((EXPONENT_MIN..=EXPONENT_MAX).contains(&exp));
        }
    }

    #[test]
    fn test_sampler_seeded_is_deterministic() {
        let mut a = ExponentSampler::with_seed(12345);
        let mut b = ExponentSampler::with_seed(12345);
        for _ in 0..100 {
            assert_eq!(a.next_exponent(), b.next_exponent());
        }
    }

    #[test]
    fn test_delta_bounded_by_sampled_factorials() {
        let mut sampler = ExponentSampler::with_seed(7);
        let (lo, hi) = (min_delta(), max_delta());
        for _ in 0..200 {
            let delta = sampler.next_delta();
            assert!(delta >= lo && delta <= hi);
        }
    }
}
