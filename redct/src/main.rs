use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libdct_audio::lossy::{DEFAULT_BLOCK_SIZE, DEFAULT_COEFF_BITS, DEFAULT_KEEP_K, DEFAULT_Q_STEP};
use redct::{ChannelMode, EncoderConfig, OverflowPolicy};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "redct")]
#[command(version)]
#[command(about = "DCT1 lossy audio encoder/decoder", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a mono PCM16 WAV file to DCT1
    Encode {
        /// Input WAV file
        input: PathBuf,
        /// Output DCT1 file
        output: PathBuf,
        /// Transform block size N
        #[arg(short = 'n', long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: u16,
        /// Low-frequency coefficients kept per block (K <= N)
        #[arg(short, long, default_value_t = DEFAULT_KEEP_K)]
        keep: u16,
        /// Bits per stored coefficient (2-24)
        #[arg(short, long, default_value_t = DEFAULT_COEFF_BITS)]
        bits: u16,
        /// Quantizer step
        #[arg(short = 'q', long, default_value_t = DEFAULT_Q_STEP)]
        step: f32,
        /// Out-of-range coefficients: saturate, error or wrap
        #[arg(long, default_value_t = OverflowPolicy::Saturate)]
        overflow: OverflowPolicy,
        /// Average multi-channel input to mono instead of rejecting it
        #[arg(long)]
        downmix: bool,
    },
    /// Decode a DCT1 file to mono PCM16 WAV
    Decode {
        /// Input DCT1 file
        input: PathBuf,
        /// Output WAV file
        output: PathBuf,
    },
    /// Average the channels of a PCM16 WAV into a mono WAV
    ToMono {
        /// Input WAV file (any channel count)
        input: PathBuf,
        /// Output mono WAV file
        output: PathBuf,
    },
    /// Show information about a DCT1 file
    Info {
        /// Input DCT1 file
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare two mono PCM16 WAV files
    Compare {
        /// Reference WAV file
        original: PathBuf,
        /// WAV file to measure
        test: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Encode {
            input,
            output,
            block_size,
            keep,
            bits,
            step,
            overflow,
            downmix,
        } => {
            let config = EncoderConfig::default()
                .with_block_size(block_size)
                .with_keep(keep)
                .with_coeff_bits(bits)
                .with_q_step(step)
                .with_overflow(overflow);
            let mode = if downmix {
                ChannelMode::Downmix
            } else {
                ChannelMode::MonoOnly
            };
            encode(&input, &output, config, mode)?;
        }
        Commands::Decode { input, output } => {
            decode(&input, &output)?;
        }
        Commands::ToMono { input, output } => {
            to_mono(&input, &output)?;
        }
        Commands::Info { input, json } => {
            info(&input, json)?;
        }
        Commands::Compare {
            original,
            test,
            json,
        } => {
            compare(&original, &test, json)?;
        }
    }

    Ok(())
}

fn encode(input: &Path, output: &Path, config: EncoderConfig, mode: ChannelMode) -> Result<()> {
    // settings are checked before touching any file
    config.validate().context("Invalid encoder settings")?;

    println!("Reading {}...", input.display());

    let wav_bytes = fs::read(input).context("Failed to read input file")?;
    let source = redct::audio::read_wav_from_bytes_with(&wav_bytes, mode)
        .context("Failed to read WAV file")?;

    println!("  Sample rate: {} Hz", source.sample_rate());
    if source.source_channels() != 1 {
        println!("  Channels:    {} (downmixed)", source.source_channels());
    }
    println!("  Frames:      {}", source.frame_count());
    println!("  Duration:    {:.2}s", source.duration_secs());

    let config = config.with_sample_rate(source.sample_rate());
    println!(
        "Encoding to DCT1 (N={}, K={}, {} bits, step {}, ~{:.1} kbps)...",
        config.block_size,
        config.keep_k,
        config.coeff_bits,
        config.q_step,
        config.bitrate_kbps()
    );

    let dct_data = redct::encode_from_samples(&source.samples, config)?;

    fs::write(output, &dct_data).context("Failed to write output file")?;

    let original_size = wav_bytes.len();
    let ratio = original_size as f64 / dct_data.len() as f64;

    println!("Done!");
    println!("  Output: {}", output.display());
    println!(
        "  Size: {} bytes ({:.1}x compression)",
        dct_data.len(),
        ratio
    );

    Ok(())
}

fn decode(input: &Path, output: &Path) -> Result<()> {
    println!("Reading {}...", input.display());

    let dct_data = fs::read(input).context("Failed to read DCT1 file")?;
    let file_info = redct::get_dct_info(&dct_data)?;

    println!("  Sample rate: {} Hz", file_info.header.sample_rate);
    println!("  Frames:      {}", file_info.header.total_frames);
    println!("  Duration:    {:.2}s", file_info.duration_secs);

    println!("Decoding...");

    let wav_bytes = redct::decode_to_wav(&dct_data)?;

    println!("Writing WAV...");

    fs::write(output, wav_bytes).context("Failed to write WAV file")?;

    println!("Done!");
    println!("  Output: {}", output.display());

    Ok(())
}

fn to_mono(input: &Path, output: &Path) -> Result<()> {
    println!("Reading {}...", input.display());

    let wav_bytes = fs::read(input).context("Failed to read input file")?;
    let mono = redct::to_mono_wav(&wav_bytes)?;

    fs::write(output, mono).context("Failed to write WAV file")?;

    println!("Done!");
    println!("  Output: {}", output.display());

    Ok(())
}

fn info(input: &Path, json: bool) -> Result<()> {
    let dct_data = fs::read(input).context("Failed to read DCT1 file")?;
    let file_info = redct::get_dct_info(&dct_data)?;

    if json {
        let json_str =
            serde_json::to_string_pretty(&file_info).context("Failed to serialize info")?;
        println!("{}", json_str);
        return Ok(());
    }

    let header = &file_info.header;
    println!("DCT1 Audio File");
    println!("───────────────────────────────");
    println!("  Version:     {}", header.version);
    println!("  Sample rate: {} Hz", header.sample_rate);
    println!("  Frames:      {}", header.total_frames);
    println!("  Duration:    {:.2}s", file_info.duration_secs);
    println!("  Block size:  {}", header.block_size);
    println!("  Kept coeffs: {}", header.keep_k);
    println!("  Coeff bits:  {}", header.coeff_bits);
    println!("  Step:        {}", header.q_step);
    println!("  Blocks:      {}", file_info.num_blocks);
    println!("  File size:   {} bytes", file_info.file_size);
    println!("  Bitrate:     {:.1} kbps", file_info.bitrate_kbps);
    println!("  Compression: {:.1}x", file_info.compression_ratio);
    println!(
        "  Size valid:  {}",
        if file_info.size_valid {
            "yes".to_string()
        } else {
            format!("no (expected {} bytes)", file_info.expected_size)
        }
    );

    Ok(())
}

fn compare(original: &Path, test: &Path, json: bool) -> Result<()> {
    let original_bytes = fs::read(original).context("Failed to read original file")?;
    let test_bytes = fs::read(test).context("Failed to read test file")?;

    let metrics = redct::compare_wavs(&original_bytes, &test_bytes)?;

    if json {
        let json_str =
            serde_json::to_string_pretty(&metrics).context("Failed to serialize metrics")?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("Samples compared: {}", metrics.samples);
    println!("MSE (L2):         {:.6}", metrics.mse);
    println!("Max abs (Linf):   {}", metrics.max_abs_error);
    if metrics.snr_db.is_infinite() {
        println!("SNR (dB):         inf");
    } else {
        println!("SNR (dB):         {:.2}", metrics.snr_db);
    }

    Ok(())
}
