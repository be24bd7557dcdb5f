//! Text rendering of lane vectors and numbers.
//!
//! Numbers use the `%g` convention: a fixed number of significant digits,
//! trailing zeros removed, scientific notation for very large or very small
//! magnitudes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lanes::Lanes8;

/// Default width of one lane field.
pub const DEFAULT_FIELD_WIDTH: usize = 12;

/// Default number of significant digits.
pub const DEFAULT_PRECISION: usize = 6;

/// Field layout for rendering lane vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneFormat {
    /// Width each lane is right-aligned in.
    pub width: usize,
    /// Significant digits per value.
    pub precision: usize,
}

impl Default for LaneFormat {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl LaneFormat {
    /// Render all eight lanes in order, each right-aligned, ending in `\n`.
    #[must_use]
    pub fn render(&self, v: Lanes8) -> String {
        let mut line = String::with_capacity(self.width * 8 + 1);
        for lane in v.to_array() {
            let text = format_general(f64::from(lane), self.precision);
            line.push_str(&format!("{text:>width$}", width = self.width));
        }
        line.push('\n');
        line
    }
}

impl fmt::Display for Lanes8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&LaneFormat::default().render(*self))
    }
}

/// Format a number with `precision` significant digits, `%g` style.
#[must_use]
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return (if value > 0.0 { "inf" } else { "-inf" }).to_string();
    }
    if value == 0.0 {
        return (if value.is_sign_negative() { "-0" } else { "0" }).to_string();
    }

    let precision = precision.max(1);
    // Exponent after rounding to the requested digits
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every rendered line holds eight separated fields of at least `width` chars.
        #[test]
        fn prop_render_field_widths(
            lanes in proptest::array::uniform8(0.0f32..1000.0),
            width in 12usize..24,
        ) {
            let format = LaneFormat { width, precision: DEFAULT_PRECISION };
            let line = format.render(Lanes8::from_array(lanes));
            prop_assert!(line.ends_with('\n'));

            let fields: Vec<&str> = line.split_whitespace().collect();
            prop_assert_eq!(fields.len(), 8);
            prop_assert!(line.len() > 8 * width);
        }
    }
}
