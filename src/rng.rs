//! Reproducible pseudo-random source for instance generation and sampling.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic integer stream in `[0, 2^30)`.
pub trait RandomSource {
    fn next_u30(&mut self) -> u32;
}

/// ChaCha-backed [`RandomSource`]; identical seeds give identical streams on
/// every platform.
pub struct Rng30 {
    inner: ChaCha8Rng,
}

impl Rng30 {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for Rng30 {
    fn next_u30(&mut self) -> u32 {
        self.inner.next_u32() >> 2
    }
}
