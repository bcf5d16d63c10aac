#[cfg(test)]
mod bitstream_tests {
    use libdct_audio::core::{BitReader, BitWriter};
    use libdct_audio::CodecError;

    #[test]
    fn test_bit_writer_reader() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b10110, 5);
        writer.write_bits(0b001, 3);
        let bytes = writer.into_bytes();
        assert_eq!(bytes, vec![0b1011_0001]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(5).unwrap(), 0b10110);
        assert_eq!(reader.read_bits(3).unwrap(), 0b001);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_fields_are_msb_first_without_padding() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xABC, 12);
        writer.write_bits(0x5, 4);
        writer.write_bits(0x1, 1);
        assert_eq!(writer.bit_count(), 17);
        assert_eq!(writer.byte_count(), 3);

        let bytes = writer.into_bytes();
        // final partial byte is zero-filled
        assert_eq!(bytes, vec![0xAB, 0xC5, 0x80]);
    }

    #[test]
    fn test_wide_fields_unaligned() {
        let values = [
            (0xDEAD_BEEFu32, 32u8),
            (0x1, 3),
            (0x00FF_FFFF, 24),
            (0x7FFF, 15),
            (0x0, 7),
            (0x1234_5678, 32),
        ];

        let mut writer = BitWriter::new();
        for &(v, w) in &values {
            writer.write_bits(v, w);
        }
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        for &(v, w) in &values {
            assert_eq!(reader.read_bits(w).unwrap(), v, "width {}", w);
        }
    }

    #[test]
    fn test_write_masks_to_width() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFFFF_FFF5, 4);
        writer.write_bits(0, 4);
        assert_eq!(writer.into_bytes(), vec![0x50]);
    }

    #[test]
    fn test_tag_and_typed_fields() {
        let mut writer = BitWriter::new();
        writer.write_bit(1);
        writer.write_tag(b"DCT1");
        writer.write_u16(0xBEEF);
        writer.write_u32(44100);
        writer.write_f32(-0.75);
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(&reader.read_tag::<4>().unwrap(), b"DCT1");
        assert_eq!(reader.read_u16().unwrap(), 0xBEEF);
        assert_eq!(reader.read_u32().unwrap(), 44100);
        assert_eq!(reader.read_f32().unwrap(), -0.75);
    }

    #[test]
    fn test_read_past_end_fails() {
        let bytes = [0xFFu8, 0x00];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(12).unwrap(), 0xFF0);
        assert_eq!(reader.remaining_bits(), 4);

        match reader.read_bits(5) {
            Err(CodecError::UnexpectedEof { needed, available }) => {
                assert_eq!(needed, 5);
                assert_eq!(available, 4);
            }
            other => panic!("expected UnexpectedEof, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_reader() {
        let mut reader = BitReader::new(&[]);
        assert!(reader.is_exhausted());
        assert_eq!(reader.remaining_bits(), 0);
        assert!(reader.read_bits(1).is_err());
    }
}
