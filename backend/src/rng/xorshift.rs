//! xorshift64* random number generator
//!
//! Fast, small-state PRNG that is good enough for outcome sampling and
//! permutation shuffling, and cheap enough to sit inside the Monte Carlo
//! hot loop without allocation.
//!
//! # Determinism
//!
//! Same seed, same sequence. Tests inject fixed seeds to make the random
//! strategy and the simulator reproducible; production callers seed from
//! whatever entropy they like.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG from a seed
    ///
    /// A zero seed is mapped to 1 (xorshift requires nonzero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Next raw 64-bit value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform value in `[min, max)`
    ///
    /// # Panics
    /// Panics if `min >= max`.
    pub fn range(&mut self, min: usize, max: usize) -> usize {
        assert!(min < max, "min must be less than max");
        let span = (max - min) as u64;
        min + (self.next() % span) as usize
    }

    /// Uniform f64 in `[0.0, 1.0)`
    pub fn next_f64(&mut self) -> f64 {
        (self.next() >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.range(0, i + 1);
            slice.swap(i, j);
        }
    }

    /// Draw an index proportionally to non-negative weights
    ///
    /// Weights need not be normalized. If every weight is zero (or the
    /// slice sums to nothing meaningful), the draw degrades to uniform over
    /// all indices so a degenerate probability pool cannot stall sampling.
    ///
    /// # Panics
    /// Panics if `weights` is empty.
    pub fn pick_weighted(&mut self, weights: &[f64]) -> usize {
        assert!(!weights.is_empty(), "weights must be non-empty");
        let total: f64 = weights.iter().copied().filter(|w| *w > 0.0).sum();
        if total <= 0.0 {
            return self.range(0, weights.len());
        }
        let mut target = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if *w <= 0.0 {
                continue;
            }
            if target < *w {
                return i;
            }
            target -= *w;
        }
        // Floating point slack can walk past the last positive weight.
        weights
            .iter()
            .rposition(|w| *w > 0.0)
            .unwrap_or(weights.len() - 1)
    }

    /// Current internal state (for diagnostics and replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
