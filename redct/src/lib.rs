//! redct - WAV converter library for the DCT1 format
//!
//! Reads 16-bit PCM WAV files (mono, or downmixed on request), encodes them with libdct, and writes
//! decoded streams back out as WAV.

pub mod audio;

pub use audio::ChannelMode;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::Serialize;

/// Re-export libdct types
pub use libdct_audio::{EncoderConfig, OverflowPolicy, QualityMetrics, StreamHeader};

/// Information about a DCT1 file
#[derive(Debug, Clone, Serialize)]
pub struct DctInfo {
    #[serde(flatten)]
    pub header: StreamHeader,
    pub num_blocks: usize,
    pub duration_secs: f64,
    pub file_size: usize,
    pub expected_size: usize,
    pub size_valid: bool,
    pub compression_ratio: f64,
    pub bitrate_kbps: f64,
}

/// Get information about a DCT1 file
pub fn get_dct_info(data: &[u8]) -> Result<DctInfo> {
    let header = libdct_audio::info(data).context("Failed to read DCT1 header")?;

    let duration_secs = header.duration_secs();
    let expected_size = header.encoded_len();
    let bitrate_kbps = if duration_secs > 0.0 {
        data.len() as f64 * 8.0 / duration_secs / 1000.0
    } else {
        0.0
    };

    Ok(DctInfo {
        header,
        num_blocks: header.num_blocks(),
        duration_secs,
        file_size: data.len(),
        expected_size,
        size_valid: data.len() == expected_size,
        compression_ratio: header.compression_ratio(),
        bitrate_kbps,
    })
}

/// Encode mono WAV file bytes to DCT1
///
/// The sample rate is taken from the WAV file, all other settings
/// come from `config`.
pub fn encode_from_wav(wav_bytes: &[u8], config: EncoderConfig) -> Result<Vec<u8>> {
    encode_from_wav_with(wav_bytes, config, ChannelMode::MonoOnly)
}

/// Encode WAV file bytes to DCT1, downmixing first when `mode` allows it
pub fn encode_from_wav_with(
    wav_bytes: &[u8],
    config: EncoderConfig,
    mode: ChannelMode,
) -> Result<Vec<u8>> {
    config.validate().context("Invalid encoder settings")?;

    let source =
        audio::read_wav_from_bytes_with(wav_bytes, mode).context("Failed to read WAV file")?;
    let config = config.with_sample_rate(source.sample_rate());

    encode_from_samples(&source.samples, config)
}

/// Average the channels of a PCM16 WAV into a mono PCM16 WAV
pub fn to_mono_wav(wav_bytes: &[u8]) -> Result<Vec<u8>> {
    let source = audio::read_wav_from_bytes_with(wav_bytes, ChannelMode::Downmix)
        .context("Failed to read WAV file")?;

    if source.source_channels() == 1 {
        info!("Input already mono; copying");
    }

    audio::write_wav_to_bytes(&source.samples, source.sample_rate())
}

/// Encode mono PCM samples to DCT1
pub fn encode_from_samples(samples: &[i16], config: EncoderConfig) -> Result<Vec<u8>> {
    let bytes = libdct_audio::encode(samples, &config).context("Failed to encode audio")?;

    info!(
        "Encoded {} frames into {} bytes (N={}, K={}, {} bits, step {})",
        samples.len(),
        bytes.len(),
        config.block_size,
        config.keep_k,
        config.coeff_bits,
        config.q_step
    );

    Ok(bytes)
}

/// Decode DCT1 bytes to mono samples and sample rate
pub fn decode_to_samples(data: &[u8]) -> Result<(Vec<i16>, u32)> {
    let decoded = libdct_audio::decode(data).context("Failed to decode DCT1 stream")?;
    let sample_rate = decoded.sample_rate();
    Ok((decoded.samples, sample_rate))
}

/// Decode DCT1 bytes to PCM16 WAV bytes
pub fn decode_to_wav(data: &[u8]) -> Result<Vec<u8>> {
    let (samples, sample_rate) = decode_to_samples(data)?;
    audio::write_wav_to_bytes(&samples, sample_rate)
}

/// Compare two mono PCM16 WAV files
///
/// Files must share the sample rate. Differing lengths are compared
/// up to the shorter one.
pub fn compare_wavs(original: &[u8], test: &[u8]) -> Result<QualityMetrics> {
    let a = audio::read_wav_from_bytes(original).context("Failed to read original WAV")?;
    let b = audio::read_wav_from_bytes(test).context("Failed to read test WAV")?;

    if a.sample_rate() != b.sample_rate() || a.channels() != b.channels() {
        bail!(
            "Format mismatch: {} Hz/{} ch vs {} Hz/{} ch",
            a.sample_rate(),
            a.channels(),
            b.sample_rate(),
            b.channels()
        );
    }

    if a.frame_count() != b.frame_count() {
        warn!(
            "Frame counts differ ({} vs {}), comparing the first {}",
            a.frame_count(),
            b.frame_count(),
            a.frame_count().min(b.frame_count())
        );
    }

    Ok(libdct_audio::compare(&a.samples, &b.samples))
}
