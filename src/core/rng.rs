//! Deterministic random number generation for a duel.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical decks, mulligans and
//!   forfeit discards, so a match can be replayed from its seed.
//! - **Unbiased**: Index sampling uses `gen_range`, which rejects rather
//!   than takes a modulo, and `shuffle` defers to `SliceRandom`.
//!
//! ```
//! use elemental_duel::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.gen_index(100), b.gen_index(100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG from a fresh OS-provided seed.
    ///
    /// The chosen seed is still recorded and available via `seed()`.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`.
    ///
    /// Panics if `len` is zero; callers check for empty collections first.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose `count` distinct indices in `0..len`, uniformly.
    ///
    /// Returns fewer than `count` when `len < count`.
    pub fn sample_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let count = count.min(len);
        for k in 0..count {
            let j = k + self.gen_index(len - k);
            pool.swap(k, j);
        }
        pool.truncate(count);
        pool
    }
}
