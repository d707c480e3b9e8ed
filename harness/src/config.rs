//! Benchmark configuration.
//!
//! Defaults reproduce the reference setup: 48kHz mono, 10ms frames,
//! 32kbit/s, 1000 byte Opus packet ceiling, 100 synthetic iterations.
//! A YAML file may override any field:
//!
//! ```yaml
//! iterations: 500
//! codecs: [lc3]
//! codec:
//!   bitrate: 64000
//!   opus_application: voip
//! tone:
//!   freq_hz: 1000.0
//! ```
//!
//! The core to pin to is not part of the file; it is always given on the
//! command line. Unknown top-level keys are rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapter::CodecKind;

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;
/// Default frame duration in microseconds.
pub const DEFAULT_FRAME_US: u32 = 10_000;
/// Default target bitrate in bits per second.
pub const DEFAULT_BITRATE: u32 = 32000;
/// Default ceiling for variable-size packets.
pub const DEFAULT_MAX_PACKET_BYTES: usize = 1000;
/// Default iteration budget for the synthetic source.
pub const DEFAULT_ITERATIONS: u64 = 100;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config: read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config: parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config: {0}")]
    Invalid(String),
}

/// Opus application profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpusApplication {
    Voip,
    #[default]
    Audio,
    Lowdelay,
}

/// Parameters shared by every codec session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub sample_rate: u32,
    pub channels: u32,
    pub frame_us: u32,
    /// Target bitrate; `0` leaves the Opus library default in place.
    pub bitrate: u32,
    pub max_packet_bytes: usize,
    pub opus_application: OpusApplication,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opus_complexity: Option<i32>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: 1,
            frame_us: DEFAULT_FRAME_US,
            bitrate: DEFAULT_BITRATE,
            max_packet_bytes: DEFAULT_MAX_PACKET_BYTES,
            opus_application: OpusApplication::default(),
            opus_complexity: None,
        }
    }
}

/// Synthetic tone settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub freq_hz: f64,
    pub amplitude: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            freq_hz: codecbench_audio::pcm::DEFAULT_TONE_HZ,
            amplitude: codecbench_audio::pcm::DEFAULT_AMPLITUDE,
        }
    }
}

/// Whole-run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Iteration budget. `None` in file mode reads the whole input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
    /// Codecs to benchmark, in order.
    pub codecs: Vec<CodecKind>,
    pub codec: CodecConfig,
    pub tone: ToneConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: None,
            codecs: vec![CodecKind::Opus, CodecKind::Lc3],
            codec: CodecConfig::default(),
            tone: ToneConfig::default(),
        }
    }
}

impl BenchConfig {
    /// Loads a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: display,
                source,
            },
            other => other,
        })
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that cannot be represented by the types alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.codecs.is_empty() {
            return Err(ConfigError::Invalid("no codecs selected".to_string()));
        }
        if self.codec.sample_rate == 0 || self.codec.frame_us == 0 {
            return Err(ConfigError::Invalid(
                "sample_rate and frame_us must be non-zero".to_string(),
            ));
        }
        if self.codec.max_packet_bytes == 0 {
            return Err(ConfigError::Invalid("max_packet_bytes must be non-zero".to_string()));
        }
        if self.iterations == Some(0) {
            return Err(ConfigError::Invalid("iterations must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Returns the samples per frame implied by the codec parameters.
    pub fn frame_samples(&self) -> usize {
        self.codec.frame_samples()
    }
}

impl CodecConfig {
    /// Returns `sample_rate * frame_us / 1s`.
    pub fn frame_samples(&self) -> usize {
        (self.sample_rate as u64 * self.frame_us as u64 / 1_000_000) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BenchConfig::default();
        assert_eq!(cfg.codec.sample_rate, 48000);
        assert_eq!(cfg.codec.channels, 1);
        assert_eq!(cfg.codec.bitrate, 32000);
        assert_eq!(cfg.codec.max_packet_bytes, 1000);
        assert_eq!(cfg.frame_samples(), 480);
        assert_eq!(cfg.codecs, vec![CodecKind::Opus, CodecKind::Lc3]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = BenchConfig::from_yaml(
            "iterations: 500\ncodecs: [lc3]\ncodec:\n  bitrate: 64000\n  opus_application: voip\n",
        )
        .unwrap();
        assert_eq!(cfg.iterations, Some(500));
        assert_eq!(cfg.codecs, vec![CodecKind::Lc3]);
        assert_eq!(cfg.codec.bitrate, 64000);
        assert_eq!(cfg.codec.opus_application, OpusApplication::Voip);
        assert_eq!(cfg.codec.sample_rate, 48000);
        assert_eq!(cfg.tone.freq_hz, 440.0);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            BenchConfig::from_yaml("codecs: []"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            BenchConfig::from_yaml("iterations: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            BenchConfig::from_yaml("codecs: [aac]"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.yaml");
        fs::write(&path, "iterations: 3\ntone:\n  freq_hz: 1000.0\n").unwrap();

        let cfg = BenchConfig::load(&path).unwrap();
        assert_eq!(cfg.iterations, Some(3));
        assert_eq!(cfg.tone.freq_hz, 1000.0);
        assert_eq!(cfg.tone.amplitude, 32767.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        // Pinning is a command-line concern only.
        let err = BenchConfig::from_yaml("core: 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("core"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = BenchConfig::load("/nonexistent/bench.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/bench.yaml"));
    }
}
