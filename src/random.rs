//! Seeded random stream owned by a single optimizer instance.
//!
//! Every draw an optimizer makes goes through one [`RandomSource`]. Two
//! sources built from the same seed yield identical sequences for identical
//! call sequences, regardless of any other source alive in the process.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// An owned, explicitly seeded random stream.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: u64,
}

impl RandomSource {
    /// Creates a stream from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a stream from `seed`, or from a fresh random seed when `None`.
    ///
    /// Unseeded streams are still internally consistent: [`seed`](Self::seed)
    /// reports the value that was drawn, so the run can be replayed.
    pub fn new(seed: Option<u64>) -> Self {
        Self::from_seed(seed.unwrap_or_else(rand::random))
    }

    /// The seed this stream was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform scalar in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// `n` uniform scalars in `[0, 1)`.
    pub fn uniform_vec(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.uniform()).collect()
    }

    /// `n` uniform scalars in `[lo, hi)`. Requires `lo < hi`.
    pub fn uniform_range_vec(&mut self, n: usize, lo: f64, hi: f64) -> Vec<f64> {
        (0..n).map(|_| self.uniform_range(lo, hi)).collect()
    }

    /// Uniform scalar in `[lo, hi)`. Requires `lo < hi`.
    pub fn uniform_range(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.random_range(lo..hi)
    }

    /// Two distinct indices from `[0, n)`, drawn without replacement.
    ///
    /// # Panics
    ///
    /// Panics if `n < 2`. Optimizers never call it with fewer than two
    /// candidates, since [`HbaConfig::validate`](crate::hba::HbaConfig::validate)
    /// rejects `pop_size < 2`.
    pub fn distinct_pair(&mut self, n: usize) -> (usize, usize) {
        assert!(n >= 2, "distinct_pair needs at least two items, got {n}");
        let first = self.rng.random_range(0..n);
        let mut second = self.rng.random_range(0..n - 1);
        if second >= first {
            second += 1;
        }
        (first, second)
    }

    /// Fair coin: `true` with probability 0.5.
    pub fn coin(&mut self) -> bool {
        self.uniform() < 0.5
    }

    /// Random direction flag, `+1.0` or `-1.0` with equal probability.
    pub fn sign(&mut self) -> f64 {
        if self.coin() {
            1.0
        } else {
            -1.0
        }
    }
}
