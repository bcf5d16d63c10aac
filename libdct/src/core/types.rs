//! common types for the DCT1 codec

use serde::Serialize;

// constants

/// Magic tag "DCT1"
pub const MAGIC: [u8; 4] = *b"DCT1";

/// format version
pub const VERSION: u16 = 1;

/// header size in bytes, magic included
///
/// | Field        | Bits |
/// |--------------|------|
/// | magic        | 32   |
/// | version      | 16   |
/// | sample rate  | 32   |
/// | total frames | 32   |
/// | block size   | 16   |
/// | keep k       | 16   |
/// | coeff bits   | 16   |
/// | q step (f32) | 32   |
pub const HEADER_SIZE: usize = 22;

/// smallest legal coefficient width
pub const MIN_COEFF_BITS: u16 = 2;

/// largest legal coefficient width
pub const MAX_COEFF_BITS: u16 = 24;

// data structures

/// DCT1 stream header, written once at the start of every stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamHeader {
    pub version: u16,
    pub sample_rate: u32,
    /// mono sample count before block padding
    pub total_frames: u32,
    pub block_size: u16,
    /// low-frequency coefficients kept per block
    pub keep_k: u16,
    pub coeff_bits: u16,
    pub q_step: f32,
}

impl StreamHeader {
    /// number of transform blocks in the payload
    pub fn num_blocks(&self) -> usize {
        if self.block_size == 0 {
            return 0;
        }
        (self.total_frames as usize).div_ceil(self.block_size as usize)
    }

    /// duration of the decoded audio in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.total_frames as f64 / self.sample_rate as f64
    }

    /// payload size in bits (everything after the header)
    pub fn payload_bits(&self) -> u64 {
        self.num_blocks() as u64 * self.keep_k as u64 * self.coeff_bits as u64
    }

    /// total encoded stream size in bytes
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload_bits().div_ceil(8) as usize
    }

    /// raw PCM16 size over encoded size
    pub fn compression_ratio(&self) -> f64 {
        let raw = self.total_frames as f64 * 2.0;
        raw / self.encoded_len() as f64
    }
}
