//! denoise command line interface
//!
//! Denoises audio files through the streaming framer and exports mono PCM16 WAV.

use clap::{Args, Parser, Subcommand};
use denoise_rs::core::config::{DEFAULT_CHUNK_SIZE, DEFAULT_FRAME_SIZE, DEFAULT_SAMPLE_RATE};
use denoise_rs::decoder::decode_file_mono;
use denoise_rs::denoiser::DenoiserKind;
use denoise_rs::encoder::Pcm16WavEncoder;
use denoise_rs::filter::{Filter, Resample};
use denoise_rs::processor::{denoise_buffer, JsonLinesSink, LogSink};
use denoise_rs::{AudioResult, Denoiser, FramerConfig, StreamingFramer};
use log::{debug, info};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "denoise")]
#[command(about = "Streaming speech denoiser", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the format of an audio file
    Probe {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Denoise an audio file to a mono 16-bit WAV
    Denoise(DenoiseArgs),
}

#[derive(Args)]
struct DenoiseArgs {
    /// Input audio file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Denoised WAV output
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Also write the unprocessed mono input
    #[arg(long, value_name = "FILE")]
    raw_output: Option<PathBuf>,

    /// Denoiser: passthrough, gate or rnnoise
    #[arg(short, long, default_value = "gate")]
    denoiser: String,

    /// Frame size in samples (defaults to what the denoiser needs, else 512)
    #[arg(long)]
    frame_size: Option<usize>,

    /// Session sample rate (16000, or 48000 for rnnoise)
    #[arg(short, long)]
    rate: Option<u32>,

    /// Samples handed to the framer per call
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Metrics flush period in milliseconds
    #[arg(long, default_value = "5000")]
    metrics_interval_ms: u64,

    /// Print metrics snapshots to stdout as JSON lines
    #[arg(long)]
    metrics_json: bool,
}

fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> AudioResult<()> {
    let mut encoder = Pcm16WavEncoder::create(path, sample_rate)?;
    encoder.write_samples(samples)?;
    denoise_rs::encoder::Encoder::finalize(&mut encoder)?;
    info!("wrote {} ({} samples)", path.display(), samples.len());
    Ok(())
}

fn run_denoise(args: DenoiseArgs) -> AudioResult<()> {
    let kind = DenoiserKind::from_name(&args.denoiser)?;
    let denoiser = kind.build();

    let frame_size = args
        .frame_size
        .or(denoiser.required_frame_size())
        .unwrap_or(DEFAULT_FRAME_SIZE);
    // RNNoise frames are 10 ms at 48 kHz
    let default_rate = if kind == DenoiserKind::Rnnoise {
        48000
    } else {
        DEFAULT_SAMPLE_RATE
    };
    let rate = args.rate.unwrap_or(default_rate);

    let config = FramerConfig::default()
        .with_frame_size(frame_size)
        .with_sample_rate(rate)
        .with_metrics_interval_ms(args.metrics_interval_ms);

    let decoded = decode_file_mono(&args.input)?;
    info!(
        "decoded {}: {} samples at {} Hz ({:?})",
        args.input.display(),
        decoded.samples().len(),
        decoded.sample_rate(),
        decoded.duration()
    );
    let mut resample = Resample::new(rate)?;
    let audio = resample.process(&decoded)?;
    debug!("session audio at {} Hz", resample.output_rate());

    if let Some(raw) = &args.raw_output {
        write_wav(raw, audio.samples(), rate)?;
    }

    let framer = StreamingFramer::new(config, denoiser)?;
    let framer = if args.metrics_json {
        framer.with_sink(JsonLinesSink::new(std::io::stdout()))
    } else {
        framer.with_sink(LogSink)
    };

    let result = denoise_buffer(framer, audio.samples(), args.chunk_size)?;
    info!(
        "{} frames, {:.1}x real time",
        result.stats.frames_processed,
        result.stats.realtime_factor()
    );

    write_wav(&args.output, &result.samples, rate)
}

fn run_probe(input: &Path) -> AudioResult<()> {
    let decoder = denoise_rs::decoder::SymphoniaDecoder::from_file(input)?;
    println!("{}", input.display());
    println!("  Sample rate: {} Hz", decoder.sample_rate());
    println!("  Channels: {}", decoder.channels().name());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    info!("denoise {}", denoise_rs::VERSION);

    match cli.command {
        Some(Commands::Probe { input }) => run_probe(&input)?,
        Some(Commands::Denoise(args)) => run_denoise(args)?,
        None => {
            println!("denoise {} - streaming speech denoiser", denoise_rs::VERSION);
            println!("\nCommands:");
            println!("  probe    - show the format of an audio file");
            println!("  denoise  - denoise a file to 16-bit mono WAV");
            println!("\nDenoisers: passthrough, gate, rnnoise (480-sample frames, 48 kHz)");
            println!("\nRun with --help for detailed options");
        }
    }

    Ok(())
}
