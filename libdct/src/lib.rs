//! libdct - block-DCT lossy codec for mono 16-bit PCM
//!
//! Audio is cut into blocks of N samples, each block is transformed with a
//! DCT-II, the lowest K coefficients are uniformly quantized and packed at a
//! fixed bit width behind a 22-byte `DCT1` header. Decoding reverses this
//! and clamps the reconstruction to the i16 range.

pub mod core;
pub mod lossy;

mod reader;
mod writer;

pub use crate::core::{
    compare, metrics, quant, CodecError, CodecResult, OverflowPolicy, QualityMetrics,
    StreamHeader, HEADER_SIZE, MAGIC, MAX_COEFF_BITS, MIN_COEFF_BITS, VERSION,
};
pub use lossy::{
    BlockTransform, DecodedAudio, Dct, EncoderConfig, TransformDecoder as Decoder,
    TransformEncoder as Encoder,
};
pub use reader::{read_header, Reader};
pub use writer::Writer;

// api functions

/// encode mono PCM samples to a DCT1 stream
///
/// # Arguments
/// * `samples` - Mono i16 samples
/// * `config` - Block size, K, coefficient width, step, sample rate
///
/// # Returns
/// The encoded stream bytes
pub fn encode(samples: &[i16], config: &EncoderConfig) -> CodecResult<Vec<u8>> {
    let mut encoder = Encoder::new(*config)?;
    encoder.encode(samples)
}

/// decode a DCT1 stream back to mono PCM samples
pub fn decode(data: &[u8]) -> CodecResult<DecodedAudio> {
    Decoder::new().decode(data)
}

/// read the header of a DCT1 stream without decoding it
pub fn info(data: &[u8]) -> CodecResult<StreamHeader> {
    read_header(data)
}
