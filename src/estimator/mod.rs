//! Monte Carlo π estimators.
//!
//! # Governing Equations
//!
//! ```text
//! Predicate:   inside(x, y) = x² + y² ≤ 1        (closed boundary)
//! Estimator:   π̂ = 4 · hits / n
//! ```
//!
//! Two implementations share the predicate and the formula:
//!
//! 1. [`scalar::ScalarEstimator`] draws one pair at a time and branches.
//! 2. [`vector::LaneEstimator`] draws eight pairs per step, turns the
//!    comparison into a lane mask and accumulates a branchless 0/1 select.
//!
//! The two consume random draws in a different order, so from the same
//! seed they agree statistically, not bitwise.

pub mod scalar;
pub mod vector;

pub use scalar::ScalarEstimator;
pub use vector::LaneEstimator;

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::engine::guard::EstimateGuard;
use crate::engine::rng::UniformSource;
use crate::error::{PiError, PiResult};

/// Which estimator produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// One sample per iteration.
    Scalar,
    /// Eight samples per iteration in SIMD lanes.
    Lanes,
}

impl Method {
    /// Label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scalar => "scalar.pi",
            Self::Lanes => "lanes.pi",
        }
    }
}

/// Outcome of one estimator run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Estimator that produced the result.
    pub method: Method,
    /// Number of samples drawn.
    pub samples: u64,
    /// Samples inside the quarter circle.
    pub hits: u64,
    /// π̂ = 4 · hits / samples.
    pub pi: f64,
}

impl Estimate {
    /// Get current error |π̂ - π|.
    #[must_use]
    pub fn absolute_error(&self) -> f64 {
        (self.pi - std::f64::consts::PI).abs()
    }

    /// Get relative error |π̂ - π| / π.
    #[must_use]
    pub fn relative_error(&self) -> f64 {
        self.absolute_error() / std::f64::consts::PI
    }

    /// Fraction of samples inside the quarter circle.
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        self.hits as f64 / self.samples as f64
    }
}

/// Build an estimate from a hit count: `4.0 * hits / samples`.
#[must_use]
pub fn estimate_from_hits(method: Method, hits: u64, samples: u64) -> Estimate {
    Estimate {
        method,
        samples,
        hits,
        pi: 4.0 * hits as f64 / samples as f64,
    }
}

/// Scalar form of the inclusion predicate.
#[must_use]
pub fn inside_unit_circle(x: f32, y: f32) -> bool {
    x * x + y * y <= 1.0
}

/// Common interface of the two estimators.
pub trait PiEstimator {
    /// Which implementation this is.
    fn method(&self) -> Method;

    /// Count hits over `samples` draws from `source`.
    ///
    /// Generic over the source so the draw inlines into the sampling loop.
    fn count_hits<S: UniformSource + ?Sized>(&self, samples: u64, source: &mut S) -> u64;

    /// Estimate π from `samples` draws.
    fn estimate<S: UniformSource + ?Sized>(&self, samples: u64, source: &mut S) -> Estimate {
        let hits = self.count_hits(samples, source);
        estimate_from_hits(self.method(), hits, samples)
    }
}

/// A timed estimator run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchRun {
    /// Result of the run.
    pub estimate: Estimate,
    /// Wall-clock duration in seconds.
    pub elapsed_secs: f64,
}

impl BenchRun {
    /// Serialize the run as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PiError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> PiResult<String> {
        serde_json::to_string(self).map_err(|e| PiError::serialization(e.to_string()))
    }
}

/// Run an estimator under a wall-clock timer and guard its result.
///
/// The timer covers sampling and the estimate formula.
///
/// # Errors
///
/// Returns error if the guard rejects the estimate.
pub fn run_timed<E: PiEstimator, S: UniformSource + ?Sized>(
    estimator: &E,
    samples: u64,
    source: &mut S,
    guard: &mut EstimateGuard,
) -> PiResult<BenchRun> {
    tracing::debug!(method = ?estimator.method(), samples, "estimator run started");

    let start = Instant::now();
    let estimate = estimator.estimate(samples, source);
    let elapsed_secs = start.elapsed().as_secs_f64();

    guard.check_estimate(&estimate)?;

    tracing::debug!(
        method = ?estimate.method,
        hits = estimate.hits,
        pi = estimate.pi,
        elapsed_secs,
        "estimator run finished"
    );

    Ok(BenchRun {
        estimate,
        elapsed_secs,
    })
}
