//! Source of uniformly distributed integers.

use rand::Rng;

/// Supplies integers uniformly distributed over a closed range.
pub trait RandomSource: Send + Sync {
    /// Returns an integer in `low..=high`.
    fn int_in_range(&self, low: i64, high: i64) -> i64;
}

/// Thread-local RNG backed source used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn int_in_range(&self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}
