//! Objective quality metrics for decoded audio

use serde::{Serialize, Serializer};

/// Error statistics between an original and a reconstructed PCM buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityMetrics {
    /// Number of sample pairs compared (the shorter length)
    pub samples: usize,
    /// Mean squared error (L2)
    pub mse: f64,
    /// Largest absolute sample difference (L-infinity)
    pub max_abs_error: u32,
    /// Signal-to-noise ratio in dB, infinite for an exact match or silence
    ///
    /// Serialized as the string `"inf"` in that case, since JSON has no
    /// infinity.
    #[serde(serialize_with = "serialize_db")]
    pub snr_db: f64,
}

impl QualityMetrics {
    pub fn is_exact(&self) -> bool {
        self.max_abs_error == 0
    }
}

fn serialize_db<S: Serializer>(db: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if db.is_infinite() && db.is_sign_positive() {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_f64(*db)
    }
}

/// Compare two PCM buffers up to the shorter length
///
/// # Arguments
/// * `original` - Reference samples
/// * `test` - Reconstructed samples
pub fn compare(original: &[i16], test: &[i16]) -> QualityMetrics {
    let count = original.len().min(test.len());

    let mut sum_sq_error = 0.0f64;
    let mut sum_sq_signal = 0.0f64;
    let mut max_abs_error = 0u32;

    for (&x, &y) in original.iter().zip(test.iter()) {
        let x = x as i32;
        let e = y as i32 - x;
        sum_sq_error += (e as f64) * (e as f64);
        sum_sq_signal += (x as f64) * (x as f64);
        max_abs_error = max_abs_error.max(e.unsigned_abs());
    }

    let mse = if count > 0 {
        sum_sq_error / count as f64
    } else {
        0.0
    };

    let snr_db = if sum_sq_signal <= 0.0 || mse <= 0.0 {
        f64::INFINITY
    } else {
        10.0 * (sum_sq_signal / sum_sq_error).log10()
    };

    QualityMetrics {
        samples: count,
        mse,
        max_abs_error,
        snr_db,
    }
}
