use anyhow::{bail, Context, Result};
use libdct_audio::core::sample_from_f64;
use log::debug;
use std::io::{Cursor, Write};
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL, CODEC_TYPE_PCM_S16LE};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// How a multi-channel WAV is handled on read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// Reject anything but one channel
    #[default]
    MonoOnly,
    /// Average all channels of each frame into one sample
    Downmix,
}

/// Mono 16-bit PCM read from a WAV file
#[derive(Debug, Clone)]
pub struct PcmSource {
    pub samples: Vec<i16>,
    sample_rate: u32,
    /// channel count of the file before any downmix
    source_channels: usize,
}

impl PcmSource {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            source_channels: 1,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.samples.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// channels held in `samples`, always mono
    pub fn channels(&self) -> usize {
        1
    }

    pub fn source_channels(&self) -> usize {
        self.source_channels
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// take all samples
    pub fn read_all(self) -> Vec<i16> {
        self.samples
    }
}

/// Read a mono PCM16 WAV file
pub fn read_wav_file(path: &Path) -> Result<PcmSource> {
    read_wav_file_with(path, ChannelMode::MonoOnly)
}

/// Read a PCM16 WAV file with any channel handling
pub fn read_wav_file_with(path: &Path, mode: ChannelMode) -> Result<PcmSource> {
    let file = std::fs::File::open(path).context("Failed to open audio file")?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    read_from_source(mss, path.extension().and_then(|e| e.to_str()), mode)
}

/// Read a mono PCM16 WAV from bytes
pub fn read_wav_from_bytes(bytes: &[u8]) -> Result<PcmSource> {
    read_wav_from_bytes_with(bytes, ChannelMode::MonoOnly)
}

/// Read a PCM16 WAV from bytes with any channel handling
pub fn read_wav_from_bytes_with(bytes: &[u8], mode: ChannelMode) -> Result<PcmSource> {
    let cursor = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());
    read_from_source(mss, Some("wav"), mode)
}

/// Mean of one frame's channel samples, rounded half away from zero
#[inline]
pub fn average_frame(sum: i64, channels: usize) -> i16 {
    sample_from_f64(sum as f64 / channels as f64)
}

fn read_from_source(
    mss: MediaSourceStream,
    extension: Option<&str>,
    mode: ChannelMode,
) -> Result<PcmSource> {
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Unsupported audio format, input must be WAV")?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No audio track found")?;

    if track.codec_params.codec != CODEC_TYPE_PCM_S16LE {
        bail!("Input must be WAV PCM_16");
    }

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("Unknown sample rate")?;
    let channels = track
        .codec_params
        .channels
        .context("Unknown channel count")?
        .count();

    if channels != 1 && mode == ChannelMode::MonoOnly {
        bail!("Mono only (1 channel), input has {} channels", channels);
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create decoder")?;

    let mut samples = Vec::new();

    // Decode all packets
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(e) => return Err(e).context("Error reading packet"),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).context("Error decoding packet")?;

        match decoded {
            AudioBufferRef::S16(buf) if channels == 1 => samples.extend_from_slice(buf.chan(0)),
            AudioBufferRef::S16(buf) => {
                let planes = buf.planes();
                let planes = planes.planes();
                for frame in 0..buf.frames() {
                    let sum: i64 = planes.iter().map(|p| p[frame] as i64).sum();
                    samples.push(average_frame(sum, planes.len()));
                }
            }
            _ => bail!("Unexpected sample format, input must be WAV PCM_16"),
        }
    }

    if channels != 1 {
        debug!("Downmixed {} channels to mono", channels);
    }
    debug!(
        "Read {} frames at {} Hz from WAV source",
        samples.len(),
        sample_rate
    );

    Ok(PcmSource {
        samples,
        sample_rate,
        source_channels: channels,
    })
}

/// Write mono samples to a PCM16 WAV file
pub fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    let bytes = write_wav_to_bytes(samples, sample_rate)?;
    std::fs::write(path, bytes).context("Failed to write WAV file")
}

/// Write mono samples to PCM16 WAV format in memory
pub fn write_wav_to_bytes(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    // WAV file format (RIFF)
    let channels = 1u16;
    let bytes_per_sample = 2u16;
    let data_size = samples.len() * bytes_per_sample as usize;
    let file_size = 36 + data_size; // 44 byte header - 8 + data_size

    let data_size = u32::try_from(data_size).context("Too many samples for a WAV file")?;
    let file_size = u32::try_from(file_size).context("Too many samples for a WAV file")?;

    let mut buffer = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buffer.write_all(b"RIFF")?;
    buffer.write_all(&file_size.to_le_bytes())?;
    buffer.write_all(b"WAVE")?;

    // fmt chunk
    buffer.write_all(b"fmt ")?;
    buffer.write_all(&16u32.to_le_bytes())?; // chunk size
    buffer.write_all(&1u16.to_le_bytes())?; // format = PCM
    buffer.write_all(&channels.to_le_bytes())?;
    buffer.write_all(&sample_rate.to_le_bytes())?;
    let byte_rate = sample_rate
        .checked_mul(channels as u32 * bytes_per_sample as u32)
        .context("Sample rate too high for a WAV file")?;
    buffer.write_all(&byte_rate.to_le_bytes())?;
    let block_align = channels * bytes_per_sample;
    buffer.write_all(&block_align.to_le_bytes())?;
    buffer.write_all(&16u16.to_le_bytes())?; // bits per sample

    // data chunk
    buffer.write_all(b"data")?;
    buffer.write_all(&data_size.to_le_bytes())?;

    for &sample in samples {
        buffer.write_all(&sample.to_le_bytes())?;
    }

    Ok(buffer)
}
