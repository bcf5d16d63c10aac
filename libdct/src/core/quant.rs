//! Uniform scalar quantization and fixed-width two's-complement packing
//!
//! Both sides of the codec share these helpers. `to_fixed_width` and
//! `sign_extend` are exact inverses for every representable value of
//! every width in `2..=24`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// What to do with a quantized coefficient that does not fit `coeff_bits`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Clamp to the nearest representable value
    #[default]
    Saturate,
    /// Fail the encode with `CodecError::CoefficientOverflow`
    Error,
    /// Keep the low bits (legacy two's-complement wrap)
    Wrap,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverflowPolicy::Saturate => "saturate",
            OverflowPolicy::Error => "error",
            OverflowPolicy::Wrap => "wrap",
        };
        f.write_str(name)
    }
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "saturate" | "clamp" => Ok(OverflowPolicy::Saturate),
            "error" | "fail" => Ok(OverflowPolicy::Error),
            "wrap" => Ok(OverflowPolicy::Wrap),
            _ => Err(format!(
                "Invalid overflow policy: {}. Use: saturate, error, wrap",
                s
            )),
        }
    }
}

/// A quantized coefficient reduced to `coeff_bits` raw bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fitted {
    InRange(u32),
    Clamped(u32),
    Wrapped(u32),
}

impl Fitted {
    /// raw field bits to pack
    pub fn bits(self) -> u32 {
        match self {
            Fitted::InRange(b) | Fitted::Clamped(b) | Fitted::Wrapped(b) => b,
        }
    }

    pub fn overflowed(self) -> bool {
        !matches!(self, Fitted::InRange(_))
    }
}

/// mask for the low `bits` bits
#[inline]
fn low_mask(bits: u8) -> u32 {
    if bits >= 32 {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

/// Smallest and largest signed values representable in `bits`
#[inline]
pub fn signed_range(bits: u8) -> (i64, i64) {
    let half = 1i64 << (bits - 1);
    (-half, half - 1)
}

/// Two's-complement pack into the low `bits` bits (wraps on overflow)
#[inline]
pub fn to_fixed_width(value: i32, bits: u8) -> u32 {
    (value as u32) & low_mask(bits)
}

/// Widen a `bits`-wide two's-complement field back to i32
#[inline]
pub fn sign_extend(raw: u32, bits: u8) -> i32 {
    if bits >= 32 {
        return raw as i32;
    }
    let mask = low_mask(bits);
    let raw = raw & mask;
    if raw & (1 << (bits - 1)) != 0 {
        (raw | !mask) as i32
    } else {
        raw as i32
    }
}

/// `round(value / q_step)` with ties away from zero
///
/// Float-to-int `as` saturates, so absurd magnitudes land on the i64 limits
/// and are then handled by the overflow policy.
#[inline]
pub fn quantize(value: f64, q_step: f64) -> i64 {
    (value / q_step).round() as i64
}

#[inline]
pub fn dequantize(q: i32, q_step: f64) -> f64 {
    q as f64 * q_step
}

/// Reduce a quantized value to `bits` raw bits under `policy`
///
/// Returns `None` when the value overflows and the policy is `Error`.
pub fn fit_to_width(q: i64, bits: u8, policy: OverflowPolicy) -> Option<Fitted> {
    let (min, max) = signed_range(bits);
    if (min..=max).contains(&q) {
        return Some(Fitted::InRange(to_fixed_width(q as i32, bits)));
    }

    match policy {
        OverflowPolicy::Saturate => {
            let clamped = q.clamp(min, max) as i32;
            Some(Fitted::Clamped(to_fixed_width(clamped, bits)))
        }
        // i64 -> i32 truncation keeps the low bits, same as the legacy cast
        OverflowPolicy::Wrap => Some(Fitted::Wrapped(to_fixed_width(q as i32, bits))),
        OverflowPolicy::Error => None,
    }
}
