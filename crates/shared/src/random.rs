//! Injectable randomness, so tests can pin canned-reply selection and
//! decorative counters.

use rand::Rng;

pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..upper`. `upper` must be non-zero.
    fn below(&self, upper: usize) -> usize;
}

/// Thread-local RNG backed source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Always returns the same index (wrapped into range).
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn below(&self, upper: usize) -> usize {
        self.0 % upper
    }
}
