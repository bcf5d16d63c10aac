#[cfg(test)]
mod tests {
    use libdct_audio::{StreamHeader, Writer, VERSION};
    use redct::audio::{
        average_frame, read_wav_from_bytes, read_wav_from_bytes_with, write_wav_to_bytes,
    };
    use redct::{compare_wavs, decode_to_samples, decode_to_wav, encode_from_wav, get_dct_info};
    use redct::{encode_from_wav_with, to_mono_wav, ChannelMode, EncoderConfig, OverflowPolicy};

    fn sine(len: usize, freq: f32, sample_rate: u32, amplitude: f32) -> Vec<i16> {
        (0..len)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                ((t * freq * 2.0 * std::f32::consts::PI).sin() * amplitude) as i16
            })
            .collect()
    }

    /// 16-bit PCM WAV with interleaved samples and any channel count
    fn pcm16_wav(samples: &[i16], channels: u16, sample_rate: u32) -> Vec<u8> {
        let data_size = (samples.len() * 2) as u32;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_size).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&channels.to_le_bytes());
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * channels as u32 * 2).to_le_bytes());
        out.extend_from_slice(&(channels * 2).to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_size.to_le_bytes());
        for s in samples {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }

    /// DCT1 stream with a header and no payload
    fn header_only(sample_rate: u32, total_frames: u32) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_header(&StreamHeader {
            version: VERSION,
            sample_rate,
            total_frames,
            block_size: 1024,
            keep_k: 256,
            coeff_bits: 12,
            q_step: 8.0,
        });
        writer.finish()
    }

    #[test]
    fn test_wav_sink_layout() {
        let wav = write_wav_to_bytes(&[1, -1, 300], 16000).unwrap();
        assert_eq!(wav.len(), 44 + 6);
        assert_eq!(&wav[..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        // PCM, mono, 16 bits
        assert_eq!(u16::from_le_bytes([wav[20], wav[21]]), 1);
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 16000);
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
        assert_eq!(&wav[44..], &[1, 0, 0xff, 0xff, 0x2c, 0x01]);
    }

    #[test]
    fn test_wav_sink_readable_by_source() {
        let samples = sine(3000, 440.0, 22050, 12000.0);
        let wav = write_wav_to_bytes(&samples, 22050).unwrap();

        let source = read_wav_from_bytes(&wav).unwrap();
        assert_eq!(source.sample_rate(), 22050);
        assert_eq!(source.channels(), 1);
        assert_eq!(source.frame_count(), samples.len());
        assert_eq!(source.read_all(), samples);
    }

    #[test]
    fn test_stereo_rejected() {
        let wav = pcm16_wav(&[0, 0, 100, 100, 200, 200], 2, 44100);
        assert!(read_wav_from_bytes(&wav).is_err());
        assert!(encode_from_wav(&wav, EncoderConfig::default()).is_err());
    }

    #[test]
    fn test_not_a_wav_rejected() {
        assert!(read_wav_from_bytes(b"definitely not audio").is_err());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let sample_rate = 44100;
        let samples = sine(sample_rate as usize, 440.0, sample_rate, 8000.0);
        let wav = write_wav_to_bytes(&samples, sample_rate).unwrap();

        let dct_bytes = encode_from_wav(&wav, EncoderConfig::default()).unwrap();

        let (decoded, decoded_sr) = decode_to_samples(&dct_bytes).unwrap();
        assert_eq!(decoded_sr, sample_rate);
        assert_eq!(decoded.len(), samples.len());

        let out_wav = decode_to_wav(&dct_bytes).unwrap();
        let metrics = compare_wavs(&wav, &out_wav).unwrap();
        assert_eq!(metrics.samples, samples.len());
        assert!(metrics.snr_db > 20.0, "snr {}", metrics.snr_db);
    }

    #[test]
    fn test_sample_rate_taken_from_wav() {
        let wav = write_wav_to_bytes(&sine(500, 200.0, 8000, 1000.0), 8000).unwrap();
        let config = EncoderConfig::new(48000).with_block_size(128).with_keep(32);

        let info = get_dct_info(&encode_from_wav(&wav, config).unwrap()).unwrap();
        assert_eq!(info.header.sample_rate, 8000);
        assert_eq!(info.header.total_frames, 500);
        assert_eq!(info.num_blocks, 4);
        assert!(info.size_valid);
        assert_eq!(info.file_size, info.expected_size);
    }

    #[test]
    fn test_invalid_config_rejected_before_reading() {
        let config = EncoderConfig::default().with_block_size(256).with_keep(300);
        // input is garbage, but the settings are what gets reported
        let err = encode_from_wav(b"garbage", config).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid encoder settings"));
    }

    #[test]
    fn test_overflow_error_surfaces() {
        let wav = write_wav_to_bytes(&[20000; 64], 8000).unwrap();
        let config = EncoderConfig::default()
            .with_block_size(64)
            .with_keep(1)
            .with_coeff_bits(2)
            .with_q_step(1.0)
            .with_overflow(OverflowPolicy::Error);
        assert!(encode_from_wav(&wav, config).is_err());
    }

    #[test]
    fn test_info_json() {
        let wav = write_wav_to_bytes(&sine(2048, 300.0, 16000, 4000.0), 16000).unwrap();
        let dct_bytes = encode_from_wav(&wav, EncoderConfig::default()).unwrap();
        let info = get_dct_info(&dct_bytes).unwrap();

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["sample_rate"], 16000);
        assert_eq!(json["block_size"], 1024);
        assert_eq!(json["keep_k"], 256);
        assert_eq!(json["num_blocks"], 2);
        assert_eq!(json["size_valid"], true);
    }

    #[test]
    fn test_info_reports_truncation() {
        let wav = write_wav_to_bytes(&sine(2048, 300.0, 16000, 4000.0), 16000).unwrap();
        let dct_bytes = encode_from_wav(&wav, EncoderConfig::default()).unwrap();

        let info = get_dct_info(&dct_bytes[..dct_bytes.len() - 10]).unwrap();
        assert!(!info.size_valid);
        assert!(decode_to_wav(&dct_bytes[..dct_bytes.len() - 10]).is_err());
    }

    #[test]
    fn test_compare_rejects_rate_mismatch() {
        let a = write_wav_to_bytes(&[1, 2, 3], 8000).unwrap();
        let b = write_wav_to_bytes(&[1, 2, 3], 16000).unwrap();
        assert!(compare_wavs(&a, &b).is_err());
    }

    #[test]
    fn test_wav_sink_rejects_oversized_sample_rate() {
        assert!(write_wav_to_bytes(&[0; 4], u32::MAX).is_err());
        assert!(write_wav_to_bytes(&[0; 4], u32::MAX / 2 + 1).is_err());
        assert!(write_wav_to_bytes(&[0; 4], u32::MAX / 2).is_ok());
    }

    #[test]
    fn test_decode_with_oversized_sample_rate_fails() {
        let bytes = header_only(u32::MAX, 0);
        let (samples, rate) = decode_to_samples(&bytes).unwrap();
        assert!(samples.is_empty());
        assert_eq!(rate, u32::MAX);

        assert!(decode_to_wav(&bytes).is_err());
    }

    #[test]
    fn test_decode_header_only_with_huge_frame_count() {
        assert!(decode_to_samples(&header_only(44100, u32::MAX)).is_err());
        assert!(decode_to_wav(&header_only(44100, u32::MAX)).is_err());
    }

    #[test]
    fn test_average_frame_rounding() {
        assert_eq!(average_frame(300, 2), 150);
        assert_eq!(average_frame(-7, 2), -4);
        assert_eq!(average_frame(3, 2), 2);
        assert_eq!(average_frame(7, 3), 2);
        assert_eq!(average_frame(32767 * 2, 2), 32767);
        assert_eq!(average_frame(-32768 * 4, 4), -32768);
    }

    #[test]
    fn test_stereo_downmix() {
        let wav = pcm16_wav(&[100, 200, -3, -4, 32767, 32767, 1, 2, -32768, -32768], 2, 22050);

        let source = read_wav_from_bytes_with(&wav, ChannelMode::Downmix).unwrap();
        assert_eq!(source.source_channels(), 2);
        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), 22050);
        assert_eq!(source.read_all(), vec![150, -4, 32767, 2, -32768]);
    }

    #[test]
    fn test_to_mono_wav_from_stereo() {
        let wav = pcm16_wav(&[1, 2, -10, -11, 0, 0], 2, 8000);
        let mono = read_wav_from_bytes(&to_mono_wav(&wav).unwrap()).unwrap();

        assert_eq!(mono.sample_rate(), 8000);
        assert_eq!(mono.source_channels(), 1);
        assert_eq!(mono.read_all(), vec![2, -11, 0]);
    }

    #[test]
    fn test_to_mono_copies_mono_input() {
        let samples = sine(700, 440.0, 16000, 9000.0);
        let wav = write_wav_to_bytes(&samples, 16000).unwrap();
        assert_eq!(to_mono_wav(&wav).unwrap(), wav);
    }

    #[test]
    fn test_encode_downmixed_stereo() {
        let left = sine(4096, 440.0, 44100, 8000.0);
        let interleaved: Vec<i16> = left.iter().flat_map(|&s| [s, s]).collect();
        let wav = pcm16_wav(&interleaved, 2, 44100);

        assert!(encode_from_wav(&wav, EncoderConfig::default()).is_err());

        let bytes =
            encode_from_wav_with(&wav, EncoderConfig::default(), ChannelMode::Downmix).unwrap();
        let (decoded, rate) = decode_to_samples(&bytes).unwrap();
        assert_eq!(rate, 44100);
        assert_eq!(decoded.len(), left.len());
    }

    #[test]
    fn test_exact_match_snr_serializes_as_inf() {
        let wav = write_wav_to_bytes(&[5, -5, 100], 8000).unwrap();
        let metrics = compare_wavs(&wav, &wav).unwrap();
        assert!(metrics.snr_db.is_infinite());

        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["snr_db"], "inf");
        assert_eq!(json["mse"], 0.0);
    }
}
