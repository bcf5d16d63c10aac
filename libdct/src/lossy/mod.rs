//! Block-DCT lossy codec for DCT1 streams
//!
//! Each block of N samples goes through a DCT-II, only the first K
//! coefficients are kept, and those are uniformly quantized and packed at a
//! fixed bit width. Decoding zero-fills the discarded coefficients and runs
//! the inverse transform.

pub mod dct;
pub mod decoder;
pub mod encoder;
pub mod transform;

// Re-export main types
pub use dct::Dct;
pub use decoder::{DecodedAudio, TransformDecoder};
pub use encoder::TransformEncoder;
pub use transform::BlockTransform;

use serde::Serialize;

use crate::core::{CodecError, CodecResult, OverflowPolicy, MAX_COEFF_BITS, MIN_COEFF_BITS};

/// Default transform block length
pub const DEFAULT_BLOCK_SIZE: u16 = 1024;
/// Default number of retained coefficients per block
pub const DEFAULT_KEEP_K: u16 = 256;
/// Default packed coefficient width
pub const DEFAULT_COEFF_BITS: u16 = 12;
/// Default quantization step
pub const DEFAULT_Q_STEP: f32 = 8.0;
/// Sample rate used when none is given
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EncoderConfig {
    /// Transform block length (N)
    pub block_size: u16,
    /// Low-frequency coefficients kept per block (K)
    pub keep_k: u16,
    /// Packed width of each quantized coefficient
    pub coeff_bits: u16,
    /// Uniform quantization step
    pub q_step: f32,
    /// Sample rate recorded in the header
    pub sample_rate: u32,
    /// Handling of coefficients that do not fit `coeff_bits`
    pub overflow: OverflowPolicy,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            keep_k: DEFAULT_KEEP_K,
            coeff_bits: DEFAULT_COEFF_BITS,
            q_step: DEFAULT_Q_STEP,
            sample_rate: DEFAULT_SAMPLE_RATE,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl EncoderConfig {
    /// Defaults with the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Default::default()
        }
    }

    pub fn with_block_size(mut self, block_size: u16) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_keep(mut self, keep_k: u16) -> Self {
        self.keep_k = keep_k;
        self
    }

    pub fn with_coeff_bits(mut self, coeff_bits: u16) -> Self {
        self.coeff_bits = coeff_bits;
        self
    }

    pub fn with_q_step(mut self, q_step: f32) -> Self {
        self.q_step = q_step;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Check every parameter before any encoding work is done
    pub fn validate(&self) -> CodecResult<()> {
        if self.block_size == 0 {
            return Err(CodecError::Config("block size must be at least 1".to_string()));
        }

        if self.keep_k > self.block_size {
            return Err(CodecError::Config(format!(
                "K ({}) cannot exceed block size ({})",
                self.keep_k, self.block_size
            )));
        }

        if !(MIN_COEFF_BITS..=MAX_COEFF_BITS).contains(&self.coeff_bits) {
            return Err(CodecError::Config(format!(
                "bits must be in [{}, {}], got {}",
                MIN_COEFF_BITS, MAX_COEFF_BITS, self.coeff_bits
            )));
        }

        if !self.q_step.is_finite() || self.q_step <= 0.0 {
            return Err(CodecError::Config(format!(
                "quantization step must be a positive number, got {}",
                self.q_step
            )));
        }

        Ok(())
    }

    /// Bits spent per block
    pub fn bits_per_block(&self) -> usize {
        self.keep_k as usize * self.coeff_bits as usize
    }

    /// Payload bitrate in kbps at the configured sample rate
    pub fn bitrate_kbps(&self) -> f64 {
        let blocks_per_sec = self.sample_rate as f64 / self.block_size.max(1) as f64;
        blocks_per_sec * self.bits_per_block() as f64 / 1000.0
    }
}
