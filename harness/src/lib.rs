//! Per-frame encode/decode latency measurement for audio codecs.
//!
//! The harness runs one timing protocol over codecs with very different
//! native APIs:
//!
//! - `adapter`: [`Codec`] / [`CodecSession`] contract with Opus and LC3 backends
//! - `runner`: timed encode-then-decode loop and aggregation
//! - `affinity`: pins the measuring thread to one CPU core
//! - `report`: text and JSON presentation of results
//! - `suite`: runs the selected codecs back to back on one source
//! - `config`: YAML-loadable defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use codecbench_audio::pcm::SineSource;
//! use codecbench_harness::{CodecConfig, CodecKind, RunOptions, Runner};
//!
//! let config = CodecConfig::default();
//! let mut source = SineSource::new(config.sample_rate, config.frame_samples()).unwrap();
//! let runner = Runner::new(RunOptions { iterations: Some(100) });
//!
//! let codec = CodecKind::Opus.codec();
//! let result = runner.run(codec.as_ref(), &config, &mut source).unwrap();
//! println!("{:?} per encode", result.encode_mean);
//! ```

pub mod adapter;
pub mod affinity;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod suite;

pub use adapter::{Codec, CodecKind, CodecSession, Decoded};
pub use affinity::{pin_to_core, AffinityError};
pub use config::{BenchConfig, CodecConfig, ConfigError, OpusApplication, ToneConfig};
pub use error::{BenchError, Call, CodecError, ErrorKind};
pub use report::OutputFormat;
pub use runner::{BenchmarkResult, Measurement, MeasureStatus, RunOptions, Runner};
pub use suite::{Outcome, Suite, SuiteReport};
