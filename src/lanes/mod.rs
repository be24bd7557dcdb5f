//! 8-lane single-precision kernel.
//!
//! [`Lanes8`] wraps `wide::f32x8`, which compiles to one AVX register, two
//! SSE2/NEON/simd128 halves, or scalar emulation depending on the target
//! (see [`capability`]). Every operation the Monte Carlo kernel needs is
//! exposed here:
//!
//! ```text
//! load / splat   → Lanes8
//! mul, add       → Lanes8
//! cmp_le         → LaneMask      (ordered, quiet: NaN lanes are false)
//! select         → Lanes8        (branchless per-lane choice)
//! reduce_sum     → f32
//! ```
//!
//! Lane extraction goes through `to_array`; no bit reinterpretation.

pub mod capability;

use std::ops::{Add, Mul};

use wide::{f32x8, CmpLe};

/// Number of lanes in a [`Lanes8`] vector.
pub const LANES: usize = 8;

/// Eight `f32` lanes processed in lockstep.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lanes8(f32x8);

impl Lanes8 {
    /// All lanes `0.0`.
    pub const ZERO: Self = Self(f32x8::ZERO);
    /// All lanes `1.0`.
    pub const ONE: Self = Self(f32x8::ONE);

    /// Broadcast one value to every lane.
    #[must_use]
    pub fn splat(value: f32) -> Self {
        Self(f32x8::splat(value))
    }

    /// Build from lane values, lane 0 first.
    #[must_use]
    pub fn from_array(values: [f32; LANES]) -> Self {
        Self(f32x8::from(values))
    }

    /// Load the first eight values of a slice.
    ///
    /// Returns `None` if the slice holds fewer than eight values.
    #[must_use]
    pub fn load(values: &[f32]) -> Option<Self> {
        let head: [f32; LANES] = values.get(..LANES)?.try_into().ok()?;
        Some(Self::from_array(head))
    }

    /// Fill the lanes in order from a generator, lane 0 first.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut() -> f32) -> Self {
        let mut lanes = [0.0; LANES];
        for lane in &mut lanes {
            *lane = f();
        }
        Self::from_array(lanes)
    }

    /// Lane-wise `self <= rhs`.
    #[must_use]
    pub fn cmp_le(self, rhs: Self) -> LaneMask {
        LaneMask(self.0.cmp_le(rhs.0))
    }

    /// Lane-wise square root.
    #[must_use]
    pub fn sqrt(self) -> Self {
        Self(self.0.sqrt())
    }

    /// Horizontal sum of all lanes in `f32`.
    #[must_use]
    pub fn reduce_sum(self) -> f32 {
        self.0.reduce_add()
    }

    /// Horizontal sum accumulated in `f64`.
    ///
    /// Exact whenever every lane holds an integer below 2²⁴.
    #[must_use]
    pub fn exact_sum(self) -> f64 {
        self.to_array().iter().map(|&lane| f64::from(lane)).sum()
    }

    /// Extract lanes to an array, lane 0 first.
    #[must_use]
    pub fn to_array(self) -> [f32; LANES] {
        self.0.to_array()
    }
}

impl Add for Lanes8 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul for Lanes8 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl From<[f32; LANES]> for Lanes8 {
    fn from(values: [f32; LANES]) -> Self {
        Self::from_array(values)
    }
}

/// Per-lane boolean produced by a lane comparison.
#[derive(Debug, Clone, Copy)]
pub struct LaneMask(f32x8);

impl LaneMask {
    /// Pick `if_true` in lanes where the mask is set, `if_false` elsewhere.
    #[must_use]
    pub fn select(self, if_true: Lanes8, if_false: Lanes8) -> Lanes8 {
        Lanes8(self.0.blend(if_true.0, if_false.0))
    }

    /// Mask bits as booleans, lane 0 first.
    #[must_use]
    pub fn to_bools(self) -> [bool; LANES] {
        let bits = self.0.move_mask();
        std::array::from_fn(|lane| bits & (1 << lane) != 0)
    }

    /// Number of set lanes.
    #[must_use]
    pub fn count_true(self) -> u32 {
        self.0.move_mask().count_ones()
    }
}

/// Lanes whose point `(x, y)` lies inside or on the unit circle.
#[must_use]
pub fn inside_mask(x: Lanes8, y: Lanes8) -> LaneMask {
    let r2 = x * x + y * y;
    r2.cmp_le(Lanes8::ONE)
}

/// `1.0` for lanes inside the unit circle, `0.0` otherwise.
#[must_use]
pub fn hit_indicator(x: Lanes8, y: Lanes8) -> Lanes8 {
    inside_mask(x, y).select(Lanes8::ONE, Lanes8::ZERO)
}
