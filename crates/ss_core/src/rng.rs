//! Noise source for the stochastic actuator models.
//!
//! One `NoiseSource` exists per match and is threaded into every kick,
//! tackle and catch evaluation by `&mut`, so a fixed seed reproduces a
//! match exactly as long as agents are processed in roster order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct NoiseSource {
    rng: ChaCha8Rng,
}

impl NoiseSource {
    pub fn from_seed(seed: u64) -> Self {
        NoiseSource { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform draw from `[lo, hi)`. Degenerate ranges return `lo`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Bernoulli draw; `p` is clamped into `[0, 1]`.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen::<f64>() < p
    }
}
