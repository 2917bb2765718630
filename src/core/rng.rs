//! Deterministic random number generation for board layouts.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same layout and reshuffles
//! - **Forkable**: A session forks a fresh stream for every retried round
//! - **Context streams**: Layout and reshuffle draw from independent sequences
//!
//! ```
//! use rust_pairs::core::GameRng;
//!
//! let mut session_rng = GameRng::new(7);
//! let round_rng = session_rng.fork();
//!
//! let mut layout = round_rng.for_context("layout");
//! let mut again = GameRng::new(7).fork().for_context("layout");
//! assert_eq!(layout.permutation(8), again.permutation(8));
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Derive an independent stream for a named purpose.
    ///
    /// The name is folded into the seed with FNV-1a, so the same seed and
    /// name give the same stream on every platform and toolchain.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let derived = context
            .bytes()
            .fold(FNV_OFFSET ^ self.seed, |hash, byte| {
                (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
            });
        Self::new(derived)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// A uniformly random permutation of `0..n`.
    #[must_use]
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        self.shuffle(&mut order);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_layouts() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);

        for _ in 0..10 {
            assert_eq!(a.permutation(16), b.permutation(16));
        }
    }

    #[test]
    fn test_fork_deals_a_different_board() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        assert_ne!(rng.permutation(20), forked.permutation(20));
    }

    #[test]
    fn test_context_is_stable() {
        let a = GameRng::new(9).for_context("layout");
        let b = GameRng::new(9).for_context("layout");
        assert_eq!(a.seed(), b.seed());
        assert_ne!(a.seed(), GameRng::new(10).for_context("layout").seed());
    }

    #[test]
    fn test_successive_forks_differ() {
        let mut rng = GameRng::new(42);
        let first = rng.fork();
        let second = rng.fork();

        assert_ne!(first.seed(), second.seed());
    }

    #[test]
    fn test_context_streams_are_independent() {
        let rng = GameRng::new(42);
        let mut layout = rng.for_context("layout");
        let mut reshuffle = rng.for_context("reshuffle");

        assert_ne!(layout.permutation(16), reshuffle.permutation(16));
    }

    #[test]
    fn test_permutation_contains_every_index() {
        let mut rng = GameRng::new(3);
        let mut order = rng.permutation(12);
        order.sort_unstable();
        assert_eq!(order, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_permutation_of_zero() {
        let mut rng = GameRng::new(3);
        assert!(rng.permutation(0).is_empty());
    }
}
