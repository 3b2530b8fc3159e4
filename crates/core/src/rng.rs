//! RNG module - seeded color draws
//!
//! All randomness in a game flows through one [`BoardRng`], so a seed fully
//! determines colorization and refills. Backed by ChaCha8 for a stable,
//! platform-independent stream.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded random source for palette draws
#[derive(Debug, Clone)]
pub struct BoardRng {
    inner: ChaCha8Rng,
}

impl BoardRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate random value in range [0, max)
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero.
    pub fn next_index(&mut self, max: usize) -> usize {
        self.inner.random_range(0..max)
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

impl Default for BoardRng {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_SEED)
    }
}
