//! codecbench - per-frame encode/decode latency benchmark for Opus and LC3.
//!
//! # Usage
//!
//! ```bash
//! # 100 frames of a 440Hz tone on core 2
//! codecbench 2
//!
//! # Every frame of a raw 48kHz mono s16le file
//! codecbench 2 speech.pcm
//!
//! # LC3 only, 64kbit/s, JSON output
//! codecbench 0 --codec lc3 --bitrate 64000 --json
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use codecbench_audio::pcm::{FileSource, SignalSource, SineSource};
use codecbench_harness::config::DEFAULT_ITERATIONS;
use codecbench_harness::affinity::available_cores;
use codecbench_harness::{pin_to_core, BenchConfig, CodecKind, OutputFormat, RunOptions, Runner, Suite};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Codec encode/decode latency benchmark.
#[derive(Parser, Debug)]
#[command(name = "codecbench")]
#[command(about = "Measure per-frame encode/decode latency of audio codecs")]
#[command(version)]
struct Cli {
    /// CPU core to pin the benchmark thread to
    core: usize,

    /// Raw PCM input (signed 16-bit little-endian, mono, 48kHz).
    /// Without it a synthetic 440Hz tone is used.
    input: Option<PathBuf>,

    /// Number of frames to measure (default: 100 synthetic, whole file otherwise)
    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// Codec to benchmark; repeat for several (default: opus, lc3)
    #[arg(short, long = "codec")]
    codecs: Vec<CodecKind>,

    /// Target bitrate in bits per second
    #[arg(short, long)]
    bitrate: Option<u32>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print one JSON object per codec instead of text
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Loads the configuration file, if any, and applies flag overrides.
    fn bench_config(&self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::load(path)?,
            None => BenchConfig::default(),
        };

        if self.iterations.is_some() {
            config.iterations = self.iterations;
        }
        if !self.codecs.is_empty() {
            config.codecs = self.codecs.clone();
        }
        if let Some(bitrate) = self.bitrate {
            config.codec.bitrate = bitrate;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Runs the benchmark suite. Returns whether every codec succeeded.
fn run(cli: &Cli) -> Result<bool> {
    let config = cli.bench_config()?;

    let core = cli.core;
    match pin_to_core(core) {
        Ok(()) => info!("Pinned to core {} of {}", core, available_cores()),
        Err(e) => warn!(
            "Failed to pin to core {} ({} available): {}",
            core,
            available_cores(),
            e
        ),
    }

    let frame_samples = config.frame_samples();
    let (mut source, iterations): (Box<dyn SignalSource>, Option<u64>) = match &cli.input {
        Some(path) => {
            let source = FileSource::open(path, frame_samples)
                .with_context(|| format!("open input {}", path.display()))?;
            info!("Reading PCM from {}", path.display());
            (Box::new(source), config.iterations)
        }
        None => {
            let source = SineSource::with_tone(
                config.codec.sample_rate,
                frame_samples,
                config.tone.freq_hz,
                config.tone.amplitude,
            )
            .context("create synthetic source")?;
            info!("Using synthetic {}Hz tone", config.tone.freq_hz);
            (Box::new(source), Some(config.iterations.unwrap_or(DEFAULT_ITERATIONS)))
        }
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let suite = Suite::new(
        Runner::new(RunOptions { iterations }),
        config.codec.clone(),
        config.codecs.clone(),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = suite
        .run(source.as_mut(), &mut out, format)
        .context("benchmark")?;
    out.flush()?;

    Ok(report.all_passed())
}
