//! Uniform random sources.
//!
//! Implements PCG (Permuted Congruential Generator) behind the
//! [`UniformSource`] trait so estimators take their randomness as an
//! explicitly borrowed object, never as ambient global state.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, the sequence of draws is bitwise-identical
//! across runs and platforms. An entropy-seeded generator records the seed
//! it drew so the run can be repeated.

use rand::prelude::*;
use rand::rngs::OsRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// A source of uniformly distributed `f32` values in `[0, 1)`.
pub trait UniformSource {
    /// Draw the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f32;
}

/// Deterministic, reproducible random number generator.
///
/// Based on PCG which provides:
/// - Excellent statistical properties
/// - Fast generation
/// - Predictable sequences from seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Number of values drawn so far.
    draws: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl PiRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            draws: 0,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Create an RNG seeded from operating-system entropy.
    ///
    /// The drawn seed is kept and available through [`Self::master_seed`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(OsRng.next_u64())
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get the number of values drawn since construction.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Generate a random f32 in [0, 1).
    pub fn gen_f32(&mut self) -> f32 {
        self.draws += 1;
        self.rng.gen()
    }
}

impl UniformSource for PiRng {
    fn next_unit(&mut self) -> f32 {
        self.gen_f32()
    }
}

/// Replays a fixed sequence of values, wrapping around at the end.
///
/// Used to feed known coordinates through the estimators.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSource {
    values: Vec<f32>,
    position: usize,
    draws: u64,
}

impl SequenceSource {
    /// Create a source replaying `values`.
    ///
    /// An empty sequence yields `0.0` forever.
    #[must_use]
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values,
            position: 0,
            draws: 0,
        }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl UniformSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        self.draws += 1;
        let Some(&value) = self.values.get(self.position) else {
            return 0.0;
        };
        self.position = (self.position + 1) % self.values.len();
        value
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Reproducibility holds for any seed.
        #[test]
        fn prop_reproducibility(seed in 0u64..u64::MAX) {
            let mut rng1 = PiRng::new(seed);
            let mut rng2 = PiRng::new(seed);

            let seq1: Vec<f32> = (0..100).map(|_| rng1.gen_f32()).collect();
            let seq2: Vec<f32> = (0..100).map(|_| rng2.gen_f32()).collect();

            prop_assert_eq!(seq1, seq2);
        }

        /// Values stay in [0, 1) for any seed.
        #[test]
        fn prop_unit_interval(seed in 0u64..u64::MAX) {
            let mut rng = PiRng::new(seed);

            for _ in 0..100 {
                let v = rng.next_unit();
                prop_assert!((0.0..1.0).contains(&v), "Value {} not in [0, 1)", v);
            }
        }
    }
}
