//! Error types for lanepi.
//!
//! All fallible functions return `Result<T, PiError>` instead of panicking.
//! The estimators themselves cannot fail; errors come from configuration,
//! the lane capability check and the result guard.

use thiserror::Error;

/// Result type alias for lanepi operations.
pub type PiResult<T> = Result<T, PiError>;

/// Unified error type for all lanepi operations.
#[derive(Debug, Error)]
pub enum PiError {
    // ===== Capability Errors =====
    /// The 8-lane kernel cannot run on this build or host.
    #[error("SIMD lanes unavailable ({backend}): {reason}")]
    LanesUnavailable {
        /// Backend the binary was compiled for.
        backend: String,
        /// Why the backend was rejected.
        reason: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Result Guard =====
    /// Non-finite value produced by an estimator.
    #[error("Guard: non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    /// More hits than samples were reported.
    #[error("Guard: {hits} hits reported for {samples} samples")]
    HitCountOverflow {
        /// Reported hit count.
        hits: u64,
        /// Sample budget of the run.
        samples: u64,
    },

    // ===== I/O Errors =====
    /// Output I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PiError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error means the program must refuse to start.
    #[must_use]
    pub const fn is_capability_error(&self) -> bool {
        matches!(self, Self::LanesUnavailable { .. })
    }
}
