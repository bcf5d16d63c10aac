use log::{debug, trace};

use super::dct::Dct;
use super::transform::BlockTransform;
use crate::core::{
    dequantize, sample_from_f64, sign_extend, CodecError, CodecResult, StreamHeader,
};
use crate::reader::Reader;

/// Decoded DCT1 stream
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Header the stream was encoded with
    pub header: StreamHeader,
    /// Exactly `header.total_frames` mono samples
    pub samples: Vec<i16>,
}

impl DecodedAudio {
    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }
}

/// Block-DCT lossy decoder
pub struct TransformDecoder<T: BlockTransform = Dct> {
    /// Synthesis transform, planned on first use
    transform: Option<T>,
    /// Plans a new transform when a stream's block size changes
    planner: Option<fn(usize) -> T>,
}

impl TransformDecoder<Dct> {
    /// Create a decoder with the built-in DCT
    pub fn new() -> Self {
        Self {
            transform: None,
            planner: Some(Dct::new),
        }
    }
}

impl Default for TransformDecoder<Dct> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BlockTransform> TransformDecoder<T> {
    /// Create a decoder around a fixed transform
    ///
    /// Streams whose block size differs from the transform's are rejected.
    pub fn with_transform(transform: T) -> Self {
        Self {
            transform: Some(transform),
            planner: None,
        }
    }

    fn transform_for(&mut self, block_size: usize) -> CodecResult<&mut T> {
        let planned = self
            .transform
            .as_ref()
            .is_some_and(|t| t.block_size() == block_size);

        if !planned {
            let plan = self.planner.ok_or_else(|| {
                CodecError::Config(format!(
                    "transform planned for {} samples, stream block size is {}",
                    self.transform.as_ref().map_or(0, |t| t.block_size()),
                    block_size
                ))
            })?;
            self.transform = Some(plan(block_size));
        }

        self.transform
            .as_mut()
            .ok_or_else(|| CodecError::Config("no block transform available".to_string()))
    }

    /// Decode a complete DCT1 stream
    pub fn decode(&mut self, data: &[u8]) -> CodecResult<DecodedAudio> {
        let mut reader = Reader::new(data);
        let header = reader.read_header()?;

        let n = header.block_size as usize;
        let k = header.keep_k as usize;
        let bits = header.coeff_bits as u8;
        let q_step = header.q_step as f64;
        let total = header.total_frames as usize;
        let num_blocks = header.num_blocks();

        debug!(
            "Decoding {} frames at {} Hz: N={}, K={}, bits/coeff={}, qStep={}, {} blocks",
            total, header.sample_rate, n, k, bits, q_step, num_blocks
        );

        // the header's frame count is untrusted until the payload backs it
        let needed = header.payload_bits();
        let available = reader.remaining_bits();
        if needed > available as u64 {
            return Err(CodecError::UnexpectedEof {
                needed: u32::try_from(needed).unwrap_or(u32::MAX),
                available,
            });
        }

        let mut samples = Vec::with_capacity(total);
        if num_blocks == 0 {
            return Ok(DecodedAudio { header, samples });
        }

        let transform = self.transform_for(n)?;
        let mut block = vec![0.0f64; n];

        for b in 0..num_blocks {
            // positions K..N stay zero
            block.fill(0.0);
            for slot in block[..k].iter_mut() {
                let raw = reader.read_coefficient(bits)?;
                *slot = dequantize(sign_extend(raw, bits), q_step);
            }

            transform.inverse(&mut block);

            // the final block's padding is dropped
            let keep = (total - samples.len()).min(n);
            samples.extend(block[..keep].iter().map(|&v| sample_from_f64(v)));

            trace!("block {}: {} samples out", b, keep);
        }

        let trailing = reader.remaining_bits();
        if trailing >= 8 {
            debug!("Ignoring {} trailing bits after payload", trailing);
        }

        Ok(DecodedAudio { header, samples })
    }
}
