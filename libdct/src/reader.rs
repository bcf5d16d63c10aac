use crate::core::{
    BitReader, CodecError, CodecResult, StreamHeader, MAGIC, MAX_COEFF_BITS, MIN_COEFF_BITS,
};

/// binary reader for DCT1 streams
pub struct Reader<'a> {
    bits: BitReader<'a>,
}

impl<'a> Reader<'a> {
    /// new reader positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Reader {
            bits: BitReader::new(data),
        }
    }

    /// read and validate the stream header
    pub fn read_header(&mut self) -> CodecResult<StreamHeader> {
        // magic
        let found: [u8; 4] = self.bits.read_tag()?;
        if found != MAGIC {
            return Err(CodecError::Format { found });
        }

        let header = StreamHeader {
            // not used to branch yet
            version: self.bits.read_u16()?,
            sample_rate: self.bits.read_u32()?,
            total_frames: self.bits.read_u32()?,
            block_size: self.bits.read_u16()?,
            keep_k: self.bits.read_u16()?,
            coeff_bits: self.bits.read_u16()?,
            q_step: self.bits.read_f32()?,
        };

        validate_header(&header)?;
        Ok(header)
    }

    /// read one packed coefficient field
    #[inline]
    pub fn read_coefficient(&mut self, coeff_bits: u8) -> CodecResult<u32> {
        self.bits.read_bits(coeff_bits)
    }

    pub fn remaining_bits(&self) -> usize {
        self.bits.remaining_bits()
    }
}

/// read just the header of a DCT1 stream
pub fn read_header(data: &[u8]) -> CodecResult<StreamHeader> {
    Reader::new(data).read_header()
}

fn validate_header(header: &StreamHeader) -> CodecResult<()> {
    if header.keep_k > header.block_size {
        return Err(CodecError::CorruptHeader(format!(
            "keep_k {} exceeds block_size {}",
            header.keep_k, header.block_size
        )));
    }

    if header.block_size == 0 && header.total_frames > 0 {
        return Err(CodecError::CorruptHeader(
            "block_size is zero but stream has frames".to_string(),
        ));
    }

    if !(MIN_COEFF_BITS..=MAX_COEFF_BITS).contains(&header.coeff_bits) {
        return Err(CodecError::CorruptHeader(format!(
            "coeff_bits {} outside [{}, {}]",
            header.coeff_bits, MIN_COEFF_BITS, MAX_COEFF_BITS
        )));
    }

    if !header.q_step.is_finite() || header.q_step <= 0.0 {
        return Err(CodecError::CorruptHeader(format!(
            "q_step {} is not a positive number",
            header.q_step
        )));
    }

    Ok(())
}
