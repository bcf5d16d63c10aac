// Bit-level packing for the DCT1 stream.
//
// Fields are written MSB-first with no padding between them; only the final
// partial byte is zero-filled when the writer is closed.

use super::error::{CodecError, CodecResult};

/// widest field the packer handles in one call
pub const MAX_FIELD_BITS: u8 = 32;

/// Bit-level writer
pub struct BitWriter {
    bytes: Vec<u8>,
    current_byte: u8,
    bit_pos: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter {
            bytes: Vec::new(),
            current_byte: 0,
            bit_pos: 0,
        }
    }

    /// writer with room for `bytes` bytes of output
    pub fn with_capacity(bytes: usize) -> Self {
        BitWriter {
            bytes: Vec::with_capacity(bytes),
            current_byte: 0,
            bit_pos: 0,
        }
    }

    pub fn write_bit(&mut self, bit: u32) {
        if bit != 0 {
            self.current_byte |= 1 << (7 - self.bit_pos);
        }

        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_pos = 0;
        }
    }

    /// write the low `num_bits` bits of `value`, MSB first
    pub fn write_bits(&mut self, value: u32, num_bits: u8) {
        debug_assert!(num_bits <= MAX_FIELD_BITS);

        // byte-aligned fast path for whole bytes
        if self.bit_pos == 0 && num_bits % 8 == 0 {
            for shift in (0..num_bits / 8).rev() {
                self.bytes.push((value >> (shift * 8)) as u8);
            }
            return;
        }

        for i in (0..num_bits).rev() {
            self.write_bit((value >> i) & 1);
        }
    }

    /// write a fixed-length tag, one byte per character
    pub fn write_tag(&mut self, tag: &[u8]) {
        for &b in tag {
            self.write_bits(b as u32, 8);
        }
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_bits(value as u32, 16);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_bits(value, 32);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_bits(value.to_bits(), 32);
    }

    /// close the stream, flushing the partial byte
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.bit_pos > 0 {
            self.bytes.push(self.current_byte);
        }
        self.bytes
    }

    pub fn bit_count(&self) -> usize {
        self.bytes.len() * 8 + self.bit_pos as usize
    }

    pub fn byte_count(&self) -> usize {
        self.bytes.len() + if self.bit_pos > 0 { 1 } else { 0 }
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Bit-level reader
pub struct BitReader<'a> {
    bytes: &'a [u8],
    byte_pos: usize,
    bit_pos: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BitReader {
            bytes,
            byte_pos: 0,
            bit_pos: 0,
        }
    }

    /// bits left before the end of the buffer
    pub fn remaining_bits(&self) -> usize {
        if self.byte_pos >= self.bytes.len() {
            0
        } else {
            (self.bytes.len() - self.byte_pos) * 8 - self.bit_pos as usize
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.byte_pos >= self.bytes.len()
    }

    fn take_bit(&mut self) -> u32 {
        let bit = (self.bytes[self.byte_pos] >> (7 - self.bit_pos)) & 1;

        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.bit_pos = 0;
            self.byte_pos += 1;
        }

        bit as u32
    }

    pub fn read_bit(&mut self) -> CodecResult<u32> {
        self.read_bits(1)
    }

    /// read a `num_bits`-wide unsigned field, MSB first
    pub fn read_bits(&mut self, num_bits: u8) -> CodecResult<u32> {
        debug_assert!(num_bits <= MAX_FIELD_BITS);

        let available = self.remaining_bits();
        if (num_bits as usize) > available {
            return Err(CodecError::UnexpectedEof {
                needed: num_bits as u32,
                available,
            });
        }

        if self.bit_pos == 0 && num_bits % 8 == 0 {
            let mut value = 0u32;
            for _ in 0..num_bits / 8 {
                value = (value << 8) | self.bytes[self.byte_pos] as u32;
                self.byte_pos += 1;
            }
            return Ok(value);
        }

        let mut value = 0u32;
        for _ in 0..num_bits {
            value = (value << 1) | self.take_bit();
        }
        Ok(value)
    }

    /// read a fixed-length tag of `N` bytes
    pub fn read_tag<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut tag = [0u8; N];
        for b in &mut tag {
            *b = self.read_bits(8)? as u8;
        }
        Ok(tag)
    }

    pub fn read_u16(&mut self) -> CodecResult<u16> {
        Ok(self.read_bits(16)? as u16)
    }

    pub fn read_u32(&mut self) -> CodecResult<u32> {
        self.read_bits(32)
    }

    pub fn read_f32(&mut self) -> CodecResult<f32> {
        Ok(f32::from_bits(self.read_bits(32)?))
    }
}
