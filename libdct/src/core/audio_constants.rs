/// Maximum value for 16-bit signed integer as f64 (2^15 - 1)
pub const I16_MAX_F64: f64 = 32767.0;

/// Minimum value for 16-bit signed integer as f64 (-2^15)
pub const I16_MIN_F64: f64 = -32768.0;

/// Convert an i16 PCM sample to the transform domain
#[inline]
pub fn sample_to_f64(sample: i16) -> f64 {
    sample as f64
}

/// Round to nearest (ties away from zero) and clamp to the i16 range
#[inline]
pub fn sample_from_f64(value: f64) -> i16 {
    value.round().clamp(I16_MIN_F64, I16_MAX_F64) as i16
}
