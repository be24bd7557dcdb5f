//! Benchmark configuration.
//!
//! The binary always runs [`BenchConfig::default()`]: a fixed budget of
//! 100 million samples and an entropy-seeded generator. The builder exists
//! for tests and benches that need small, seeded runs.
//!
//! Mistakes are caught before any sampling starts:
//! - Field ranges via `validator`
//! - Lane divisibility of the sample budget via semantic validation

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::display::{LaneFormat, DEFAULT_FIELD_WIDTH, DEFAULT_PRECISION};
use crate::error::{PiError, PiResult};
use crate::lanes::LANES;

/// Samples drawn by each estimator in the default run.
pub const DEFAULT_SAMPLES: u64 = 100_000_000;

const _: () = assert!(DEFAULT_SAMPLES % LANES as u64 == 0);

/// Top-level benchmark configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    /// Samples per estimator; must be a positive multiple of the lane width.
    #[validate(range(min = 1))]
    #[serde(default = "default_samples")]
    pub samples: u64,

    /// Master seed; `None` seeds from operating-system entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Width of each lane field in the illustration output.
    #[validate(range(min = 1, max = 64))]
    #[serde(default = "default_field_width")]
    pub field_width: usize,

    /// Significant digits for printed numbers.
    #[validate(range(min = 1, max = 9))]
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Accept the scalar-emulated lane backend.
    #[serde(default = "default_allow_portable")]
    pub allow_portable_lanes: bool,
}

const fn default_samples() -> u64 {
    DEFAULT_SAMPLES
}

const fn default_field_width() -> usize {
    DEFAULT_FIELD_WIDTH
}

const fn default_precision() -> usize {
    DEFAULT_PRECISION
}

const fn default_allow_portable() -> bool {
    cfg!(feature = "portable-lanes")
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            seed: None,
            field_width: default_field_width(),
            precision: default_precision(),
            allow_portable_lanes: default_allow_portable(),
        }
    }
}

impl BenchConfig {
    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> BenchConfigBuilder {
        BenchConfigBuilder::default()
    }

    /// Run field and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns error if a field is out of range or the sample budget does
    /// not split into whole lane groups.
    pub fn check(&self) -> PiResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate constraints beyond field ranges.
    fn validate_semantic(&self) -> PiResult<()> {
        if self.samples % LANES as u64 != 0 {
            return Err(PiError::config(format!(
                "samples must be a multiple of {LANES}, got {}",
                self.samples
            )));
        }
        Ok(())
    }

    /// Lane field layout for the illustration output.
    #[must_use]
    pub const fn lane_format(&self) -> LaneFormat {
        LaneFormat {
            width: self.field_width,
            precision: self.precision,
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct BenchConfigBuilder {
    samples: Option<u64>,
    seed: Option<u64>,
    field_width: Option<usize>,
    precision: Option<usize>,
    allow_portable_lanes: Option<bool>,
}

impl BenchConfigBuilder {
    /// Set the sample budget.
    #[must_use]
    pub const fn samples(mut self, samples: u64) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the lane field width.
    #[must_use]
    pub const fn field_width(mut self, width: usize) -> Self {
        self.field_width = Some(width);
        self
    }

    /// Set the number of significant digits.
    #[must_use]
    pub const fn precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }

    /// Opt in or out of the portable lane backend.
    #[must_use]
    pub const fn allow_portable_lanes(mut self, allow: bool) -> Self {
        self.allow_portable_lanes = Some(allow);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration is invalid.
    pub fn build(self) -> PiResult<BenchConfig> {
        let mut config = BenchConfig::default();

        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        config.seed = self.seed;
        if let Some(width) = self.field_width {
            config.field_width = width;
        }
        if let Some(digits) = self.precision {
            config.precision = digits;
        }
        if let Some(allow) = self.allow_portable_lanes {
            config.allow_portable_lanes = allow;
        }

        config.check()?;
        Ok(config)
    }
}
