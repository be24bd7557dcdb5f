//! Result guard for estimator output.
//!
//! Stops a run before a bad estimate is reported: the line halts on
//! non-finite values or on hit counts that exceed the sample budget.
//!
//! # Example
//!
//! ```rust
//! use lanepi::engine::guard::EstimateGuard;
//!
//! let mut guard = EstimateGuard::new();
//! assert!(guard.check_value("pi", 3.0).is_ok());
//! assert!(guard.check_value("pi", f64::NAN).is_err());
//! ```

use crate::error::{PiError, PiResult};
use crate::estimator::Estimate;

/// Checks estimates before they leave the library.
#[derive(Debug, Clone, Default)]
pub struct EstimateGuard {
    /// Counter of rejected values.
    abort_count: u64,
}

impl EstimateGuard {
    /// Create a guard with a zeroed abort counter.
    #[must_use]
    pub const fn new() -> Self {
        Self { abort_count: 0 }
    }

    /// Check a single value for non-finite results.
    ///
    /// # Errors
    ///
    /// Returns [`PiError::NonFiniteValue`] for NaN or infinite values.
    pub fn check_value(&mut self, location: &str, value: f64) -> PiResult<()> {
        if !value.is_finite() {
            self.abort_count += 1;
            return Err(PiError::NonFiniteValue {
                location: location.to_string(),
            });
        }
        Ok(())
    }

    /// Check an estimate for consistency.
    ///
    /// # Errors
    ///
    /// Returns error if the hit count exceeds the sample budget or the
    /// estimate is not finite.
    pub fn check_estimate(&mut self, estimate: &Estimate) -> PiResult<()> {
        if estimate.hits > estimate.samples {
            self.abort_count += 1;
            return Err(PiError::HitCountOverflow {
                hits: estimate.hits,
                samples: estimate.samples,
            });
        }
        self.check_value(estimate.method.label(), estimate.pi)
    }

    /// Get total abort count.
    #[must_use]
    pub const fn abort_count(&self) -> u64 {
        self.abort_count
    }
}
