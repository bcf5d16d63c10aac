use crate::core::{BitWriter, StreamHeader, HEADER_SIZE, MAGIC};

/// binary writer for DCT1 streams
pub struct Writer {
    bits: BitWriter,
}

impl Writer {
    /// new writer
    pub fn new() -> Self {
        Writer {
            bits: BitWriter::with_capacity(HEADER_SIZE),
        }
    }

    /// writer sized for the full stream described by `header`
    pub fn for_header(header: &StreamHeader) -> Self {
        Writer {
            bits: BitWriter::with_capacity(header.encoded_len()),
        }
    }

    /// write the stream header
    ///
    /// Fields go out in declaration order, big-endian, with no padding.
    pub fn write_header(&mut self, header: &StreamHeader) {
        // Magic "DCT1"
        self.bits.write_tag(&MAGIC);

        self.bits.write_u16(header.version);
        self.bits.write_u32(header.sample_rate);
        self.bits.write_u32(header.total_frames);
        self.bits.write_u16(header.block_size);
        self.bits.write_u16(header.keep_k);
        self.bits.write_u16(header.coeff_bits);
        self.bits.write_f32(header.q_step);
    }

    /// append one packed coefficient field
    #[inline]
    pub fn write_coefficient(&mut self, raw: u32, coeff_bits: u8) {
        self.bits.write_bits(raw, coeff_bits);
    }

    pub fn bit_count(&self) -> usize {
        self.bits.bit_count()
    }

    /// close the stream and hand back its bytes
    pub fn finish(self) -> Vec<u8> {
        self.bits.into_bytes()
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
