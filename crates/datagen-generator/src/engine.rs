//! Seedable pseudo-random bit source.

use datagen_core::DEFAULT_SEED;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random engine.
///
/// Wraps ChaCha8, whose output stream is fixed for a given seed across
/// platforms and crate releases, so a table generated from the same seed is
/// bit-identical everywhere. Implements [`RngCore`], so every `rand_distr`
/// distribution can sample from it directly.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: ChaCha8Rng,
}

impl RandomEngine {
    /// Create an engine whose state is fully determined by `seed`.
    pub fn seeded(seed: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(u64::from(seed)),
        }
    }

    /// Draw a 32-bit value, e.g. to seed a child engine.
    pub fn next(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

impl RngCore for RandomEngine {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
