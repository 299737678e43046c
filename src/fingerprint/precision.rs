//! Decimal precision and coordinate quantization.
//!
//! Coordinates are snapped to an integer grid at [`MAX_PRECISION`] decimals
//! and then rounded down one decimal at a time to the requested precision.
//! Every coarser key is therefore a function of the next finer key, so two
//! values equal at precision `p + 1` are always equal at precision `p`.
//! All formatting goes through integer digits, never float formatting.
//!
//! The cascade moves the round-up point. With `s = 9 - p` steps, a remainder
//! rounds away from zero once it reaches `0.4…45` of a unit (`s - 1` fours,
//! then a 5) instead of `0.5`. At precision 1 that is `0.44444445`, so every
//! value in `[k - 0.5556, k + 0.4444)` units of `0.1` shares key `k` (mirrored
//! for negative values): `0.1449` keys as `0.2`, `0.14444` as `0.1`. At
//! precision 9 rounding is exact, and at precision 8 the threshold is `0.5`.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Finest supported precision (decimal digits).
pub const MAX_PRECISION: u8 = 9;

/// Default precision: one decimal digit.
pub const DEFAULT_PRECISION: u8 = 1;

/// Precision out of the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("precision {0} is out of range (0..={MAX_PRECISION})")]
pub struct PrecisionError(pub u32);

/// Number of decimal digits kept when fingerprinting coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision(u8);

impl Precision {
    /// # Errors
    ///
    /// Returns [`PrecisionError`] if `digits` exceeds [`MAX_PRECISION`].
    pub fn new(digits: u32) -> Result<Self, PrecisionError> {
        u8::try_from(digits)
            .ok()
            .filter(|&d| d <= MAX_PRECISION)
            .map(Self)
            .ok_or(PrecisionError(digits))
    }

    #[must_use]
    pub fn digits(self) -> u8 {
        self.0
    }

    /// Next coarser precision, if any.
    #[must_use]
    pub fn coarser(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    /// Next finer precision, if any.
    #[must_use]
    pub fn finer(self) -> Option<Self> {
        (self.0 < MAX_PRECISION).then(|| Self(self.0 + 1))
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(DEFAULT_PRECISION)
    }
}

impl TryFrom<u32> for Precision {
    type Error = PrecisionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Precision> for u32 {
    fn from(value: Precision) -> Self {
        u32::from(value.0)
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer division by 10 rounding half away from zero.
fn div10_round(n: i128) -> i128 {
    let q = n / 10;
    let r = n % 10;
    if r >= 5 {
        q + 1
    } else if r <= -5 {
        q - 1
    } else {
        q
    }
}

/// Scaled integer value of `value` at `precision`, or `None` if not finite.
#[must_use]
pub fn quantize(value: f64, precision: Precision) -> Option<i128> {
    if !value.is_finite() {
        return None;
    }
    let scale = 10f64.powi(i32::from(MAX_PRECISION));
    // `as` saturates for magnitudes beyond i128.
    let mut n = (value * scale).round() as i128;
    for _ in precision.digits()..MAX_PRECISION {
        n = div10_round(n);
    }
    Some(n)
}

/// Append the fixed-point representation of `value` to `out`.
pub fn write_quantized(out: &mut String, value: f64, precision: Precision) {
    let Some(n) = quantize(value, precision) else {
        // Display for f64 gives "NaN", "inf", "-inf" regardless of locale.
        let _ = write!(out, "{value}");
        return;
    };

    let digits = n.unsigned_abs().to_string();
    let places = usize::from(precision.digits());
    if n < 0 {
        out.push('-');
    }
    if places == 0 {
        out.push_str(&digits);
        return;
    }
    if digits.len() <= places {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take(places - digits.len()));
        out.push_str(&digits);
    } else {
        let (int_part, frac_part) = digits.split_at(digits.len() - places);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    }
}

/// Fixed-point string for `value` at `precision`.
#[must_use]
pub fn format_quantized(value: f64, precision: Precision) -> String {
    let mut out = String::new();
    write_quantized(&mut out, value, precision);
    out
}
