//! # lanepi
//!
//! Monte Carlo estimation of π, scalar and in 8 SIMD lanes.
//!
//! Two estimators sample the unit quarter-circle with the same predicate
//! (`x² + y² ≤ 1`) and the same formula (`π̂ = 4 · hits / n`):
//! - a scalar loop that branches on every sample
//! - a lane kernel that turns the branch into a mask and a select over
//!   eight samples at a time
//!
//! ## Example
//!
//! ```rust
//! use lanepi::prelude::*;
//!
//! let mut rng = PiRng::new(42);
//! let scalar = ScalarEstimator.estimate(80_000, &mut rng);
//! let lanes = LaneEstimator.estimate(80_000, &mut rng);
//! assert!((scalar.pi - lanes.pi).abs() < 0.1);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod config;
pub mod demo;
pub mod display;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod lanes;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{BenchConfig, BenchConfigBuilder};
    pub use crate::display::LaneFormat;
    pub use crate::engine::rng::{PiRng, SequenceSource, UniformSource};
    pub use crate::engine::guard::EstimateGuard;
    pub use crate::error::{PiError, PiResult};
    pub use crate::estimator::{Estimate, LaneEstimator, Method, PiEstimator, ScalarEstimator};
    pub use crate::lanes::capability::{LaneBackend, LaneCapability};
    pub use crate::lanes::{Lanes8, LANES};
}

/// Re-export for public API
pub use error::{PiError, PiResult};

/// Crate version, reported at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_package_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(VERSION.split('.').count(), 3);
    }
}
