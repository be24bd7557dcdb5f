//! Estimation engine support: random sources and the result guard.

pub mod guard;
pub mod rng;

pub use guard::EstimateGuard;
pub use rng::{PiRng, SequenceSource, UniformSource};
