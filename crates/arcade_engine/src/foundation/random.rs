//! Seedable dice for gameplay rolls
//!
//! Wraps [`rand::rngs::StdRng`]. A fixed seed makes a whole run replayable;
//! without one the generator is seeded from the operating system.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Gameplay random source
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
    seed: Option<u64>,
}

impl Dice {
    /// Create dice from an optional seed
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, seed }
    }

    /// Deterministic dice
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Seed the dice were created with, if any
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// True with probability `1 / n`; `n` of 0 or 1 always succeeds
    pub fn one_in(&mut self, n: u32) -> bool {
        n <= 1 || self.rng.gen_range(0..n) == 0
    }

    /// Uniform integer in `0..n`; 0 when `n` is 0
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.rng.gen_range(0..n)
        }
    }

    /// Uniform float in `low..high`
    pub fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            low
        } else {
            self.rng.gen_range(low..high)
        }
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new(None)
    }
}
