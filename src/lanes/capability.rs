//! Lane backend selection and the startup capability check.
//!
//! `build.rs` mirrors the backend choice `wide::f32x8` makes for the target
//! and exports it as `LANEPI_LANE_BACKEND`. Targets without SIMD are
//! rejected at build time unless the `portable-lanes` feature is enabled.
//! At startup [`LaneCapability::ensure_supported`] refuses to run when the
//! compiled backend would silently degrade or cannot execute on the host.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PiError, PiResult};

/// Instruction set the 8-lane type compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaneBackend {
    /// One 256-bit AVX register.
    Avx,
    /// Two 128-bit SSE2 halves.
    Sse2Pair,
    /// Two 128-bit NEON halves.
    Neon,
    /// Two 128-bit WebAssembly SIMD halves.
    Simd128,
    /// Scalar emulation, eight independent `f32` operations.
    Portable,
}

impl LaneBackend {
    /// Backend this binary was compiled for.
    #[must_use]
    pub fn compiled() -> Self {
        Self::from_build_name(env!("LANEPI_LANE_BACKEND"))
    }

    /// Parse the name exported by the build script.
    #[must_use]
    pub fn from_build_name(name: &str) -> Self {
        match name {
            "avx" => Self::Avx,
            "sse2" => Self::Sse2Pair,
            "neon" => Self::Neon,
            "simd128" => Self::Simd128,
            _ => Self::Portable,
        }
    }

    /// Whether lane operations run on vector hardware.
    #[must_use]
    pub const fn is_hardware(self) -> bool {
        !matches!(self, Self::Portable)
    }

    /// Short name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Avx => "avx",
            Self::Sse2Pair => "sse2x2",
            Self::Neon => "neon",
            Self::Simd128 => "simd128",
            Self::Portable => "portable",
        }
    }
}

impl fmt::Display for LaneBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiled backend paired with what the host CPU offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneCapability {
    /// Backend compiled into the binary.
    pub backend: LaneBackend,
    /// Whether the running host supports the compiled backend.
    pub host_supported: bool,
}

impl LaneCapability {
    /// Detect the capability of this build on the current host.
    #[must_use]
    pub fn detect() -> Self {
        let backend = LaneBackend::compiled();
        Self {
            backend,
            host_supported: host_supports(backend),
        }
    }

    /// Refuse to run unless the lanes execute as compiled on real hardware.
    ///
    /// `allow_portable` is the explicit opt-in to scalar emulation.
    ///
    /// # Errors
    ///
    /// Returns [`PiError::LanesUnavailable`] if the host lacks the compiled
    /// instruction set, or if the backend is portable without opt-in.
    pub fn ensure_supported(self, allow_portable: bool) -> PiResult<Self> {
        if !self.host_supported {
            return Err(PiError::LanesUnavailable {
                backend: self.backend.to_string(),
                reason: "host CPU lacks the instruction set this binary was built for"
                    .to_string(),
            });
        }
        if !self.backend.is_hardware() {
            if !allow_portable {
                return Err(PiError::LanesUnavailable {
                    backend: self.backend.to_string(),
                    reason: "no SIMD backend; enable the `portable-lanes` feature to accept \
                             scalar emulation"
                        .to_string(),
                });
            }
            tracing::warn!("8-lane kernel running on portable scalar emulation");
        }
        tracing::info!(backend = %self.backend, "lane capability verified");
        Ok(self)
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn host_supports(backend: LaneBackend) -> bool {
    match backend {
        LaneBackend::Avx => std::arch::is_x86_feature_detected!("avx"),
        LaneBackend::Sse2Pair => std::arch::is_x86_feature_detected!("sse2"),
        _ => true,
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn host_supports(_backend: LaneBackend) -> bool {
    true
}
