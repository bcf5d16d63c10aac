use log::{debug, trace, warn};

use super::dct::Dct;
use super::transform::BlockTransform;
use super::EncoderConfig;
use crate::core::{
    fit_to_width, quantize, sample_to_f64, CodecError, CodecResult, StreamHeader, VERSION,
};
use crate::writer::Writer;

/// Block-DCT lossy encoder
pub struct TransformEncoder<T: BlockTransform = Dct> {
    /// Validated settings
    config: EncoderConfig,
    /// Analysis transform planned for `config.block_size`
    transform: T,
    /// Working block, reused for every iteration
    block: Vec<f64>,
}

impl TransformEncoder<Dct> {
    /// Create an encoder with the built-in DCT
    pub fn new(config: EncoderConfig) -> CodecResult<Self> {
        config.validate()?;
        let transform = Dct::new(config.block_size as usize);
        Self::with_transform(config, transform)
    }
}

impl<T: BlockTransform> TransformEncoder<T> {
    /// Create an encoder with a caller-supplied transform
    pub fn with_transform(config: EncoderConfig, transform: T) -> CodecResult<Self> {
        config.validate()?;

        let n = config.block_size as usize;
        if transform.block_size() != n {
            return Err(CodecError::Config(format!(
                "transform planned for {} samples, block size is {}",
                transform.block_size(),
                n
            )));
        }

        Ok(Self {
            config,
            transform,
            block: vec![0.0; n],
        })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Header describing a stream of `total_frames` samples
    pub fn header_for(&self, total_frames: u32) -> StreamHeader {
        StreamHeader {
            version: VERSION,
            sample_rate: self.config.sample_rate,
            total_frames,
            block_size: self.config.block_size,
            keep_k: self.config.keep_k,
            coeff_bits: self.config.coeff_bits,
            q_step: self.config.q_step,
        }
    }

    /// Encode mono PCM samples to a complete DCT1 stream
    pub fn encode(&mut self, pcm: &[i16]) -> CodecResult<Vec<u8>> {
        let total_frames = u32::try_from(pcm.len()).map_err(|_| {
            CodecError::Config(format!(
                "{} samples exceed the 32-bit frame count",
                pcm.len()
            ))
        })?;

        let header = self.header_for(total_frames);
        let n = header.block_size as usize;
        let k = header.keep_k as usize;
        let bits = header.coeff_bits as u8;
        let q_step = header.q_step as f64;
        let policy = self.config.overflow;

        // The DCT-II / DCT-III pair scales by 2N; undo it here
        let scale = 1.0 / (2.0 * n as f64);

        debug!(
            "Encoding {} frames at {} Hz: N={}, K={}, bits/coeff={}, qStep={}, {} blocks",
            total_frames,
            header.sample_rate,
            n,
            k,
            bits,
            q_step,
            header.num_blocks()
        );

        let mut writer = Writer::for_header(&header);
        writer.write_header(&header);

        let mut overflows = 0usize;

        for (b, chunk) in pcm.chunks(n).enumerate() {
            // load block with zero-padding
            self.block.fill(0.0);
            for (dst, &s) in self.block.iter_mut().zip(chunk) {
                *dst = sample_to_f64(s);
            }

            self.transform.forward(&mut self.block);

            // coefficients past K are dropped
            for (idx, &c) in self.block[..k].iter().enumerate() {
                let q = quantize(c * scale, q_step);
                let fitted =
                    fit_to_width(q, bits, policy).ok_or(CodecError::CoefficientOverflow {
                        block: b,
                        index: idx,
                        value: q,
                        bits: header.coeff_bits,
                    })?;

                if fitted.overflowed() {
                    if overflows == 0 {
                        warn!(
                            "Coefficient {} in block {} ({}) does not fit in {} bits, applying {} policy",
                            idx, b, q, bits, policy
                        );
                    }
                    overflows += 1;
                }

                writer.write_coefficient(fitted.bits(), bits);
            }

            trace!("block {}: {} samples in, {} coefficients out", b, chunk.len(), k);
        }

        if overflows > 0 {
            warn!(
                "{} coefficients exceeded {} bits; consider more bits or a larger step",
                overflows, bits
            );
        }

        debug!("Encoded {} payload bits", writer.bit_count() - 8 * crate::HEADER_SIZE);

        Ok(writer.finish())
    }
}
