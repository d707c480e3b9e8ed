//! Codec adapters.
//!
//! A [`Codec`] opens a [`CodecSession`] holding live encoder and decoder
//! state. Sessions expose one calling convention for every backend:
//!
//! - `encode` writes one packet or fails with [`CodecError::Encode`]
//! - `decode` fills one frame and reports whether concealment ran, or fails
//!   with [`CodecError::Decode`]
//!
//! Dropping the session releases all native resources, so teardown happens
//! exactly once on every exit path.
//!
//! Backend-specific signalling (signed sizes for Opus, status codes and
//! pre-sized state blocks for LC3) stays inside the adapter modules.

#[cfg(feature = "lc3")]
mod lc3;
#[cfg(feature = "opus")]
mod opus;

use std::fmt;
use std::str::FromStr;

use codecbench_audio::codec::Packet;
use serde::{Deserialize, Serialize};

use crate::config::CodecConfig;
use crate::error::CodecError;

#[cfg(feature = "lc3")]
pub use lc3::Lc3Codec;
#[cfg(feature = "opus")]
pub use opus::OpusCodec;

/// Result of a successful decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Samples written to the output frame.
    pub samples: usize,
    /// The backend substituted packet loss concealment output.
    pub concealed: bool,
}

/// Live encoder/decoder pair for one benchmark run.
pub trait CodecSession {
    /// Samples per frame this session encodes and decodes.
    fn frame_samples(&self) -> usize;

    /// Capacity the packet buffer must have.
    fn max_packet_bytes(&self) -> usize;

    /// Encodes exactly one frame into `packet`.
    fn encode(&mut self, pcm: &[i16], packet: &mut Packet) -> Result<(), CodecError>;

    /// Decodes exactly one packet into `out`.
    fn decode(&mut self, packet: &Packet, out: &mut [i16]) -> Result<Decoded, CodecError>;
}

/// A codec backend that can open sessions.
pub trait Codec {
    /// Display name used in logs and reports.
    fn name(&self) -> &str;

    /// Allocates and initializes encoder and decoder state.
    ///
    /// On failure nothing is returned and nothing needs releasing.
    fn open(&self, config: &CodecConfig) -> Result<Box<dyn CodecSession>, CodecError>;
}

/// Registered backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    /// Variable-bitrate Opus.
    Opus,
    /// Fixed-frame LC3.
    Lc3,
}

impl CodecKind {
    /// All registered backends in benchmark order.
    pub const ALL: [CodecKind; 2] = [CodecKind::Opus, CodecKind::Lc3];

    /// Returns the display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Opus => "Opus",
            Self::Lc3 => "LC3",
        }
    }

    /// Returns the adapter for this backend.
    ///
    /// Backends compiled out of this build return an adapter whose `open`
    /// fails with a setup error.
    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            #[cfg(feature = "opus")]
            Self::Opus => Box::new(OpusCodec),
            #[cfg(feature = "lc3")]
            Self::Lc3 => Box::new(Lc3Codec),
            #[allow(unreachable_patterns)]
            kind => Box::new(Unavailable(kind)),
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "opus" => Ok(Self::Opus),
            "lc3" => Ok(Self::Lc3),
            other => Err(format!("unknown codec {:?} (expected opus or lc3)", other)),
        }
    }
}

/// Placeholder for a backend whose cargo feature is disabled.
struct Unavailable(CodecKind);

impl Codec for Unavailable {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn open(&self, _config: &CodecConfig) -> Result<Box<dyn CodecSession>, CodecError> {
        let feature = match self.0 {
            CodecKind::Opus => "opus",
            CodecKind::Lc3 => "lc3",
        };
        Err(CodecError::Setup(format!(
            "built without the `{}` feature",
            feature
        )))
    }
}

pub(crate) fn require_mono(config: &CodecConfig) -> Result<(), CodecError> {
    if config.channels != 1 {
        return Err(CodecError::Setup(format!(
            "{} channels requested, only mono is supported",
            config.channels
        )));
    }
    Ok(())
}
