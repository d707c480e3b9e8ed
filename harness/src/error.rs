use std::fmt;
use std::io;

use serde::Serialize;
use thiserror::Error;

/// Failure reported by a codec backend.
///
/// Adapters translate each backend's native signalling into these variants;
/// the reason keeps the backend's own text or status code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("setup failed: {0}")]
    Setup(String),

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("decode failed: {0}")]
    Decode(String),
}

impl CodecError {
    /// Returns the backend's reason text.
    pub fn reason(&self) -> &str {
        match self {
            Self::Setup(r) | Self::Encode(r) | Self::Decode(r) => r,
        }
    }
}

/// The operation a benchmark error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Call {
    Open,
    Read,
    Encode,
    Decode,
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Read => "read",
            Self::Encode => "encode",
            Self::Decode => "decode",
        })
    }
}

/// Coarse classification of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Setup,
    Encode,
    Decode,
    NoData,
    Input,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "SetupError",
            Self::Encode => "EncodeError",
            Self::Decode => "DecodeError",
            Self::NoData => "NoDataError",
            Self::Input => "InputError",
        })
    }
}

/// Terminal error of one codec's benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("{codec}: session setup failed: {reason}")]
    Setup { codec: String, reason: String },

    #[error("{codec}: encode failed at iteration {iteration}: {reason}")]
    Encode {
        codec: String,
        iteration: u64,
        reason: String,
    },

    #[error("{codec}: decode failed at iteration {iteration}: {reason}")]
    Decode {
        codec: String,
        iteration: u64,
        reason: String,
    },

    #[error("{codec}: input produced no complete frame")]
    NoData { codec: String },

    #[error("{codec}: reading input at iteration {iteration}: {source}")]
    Input {
        codec: String,
        iteration: u64,
        #[source]
        source: io::Error,
    },
}

impl BenchError {
    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Setup { .. } => ErrorKind::Setup,
            Self::Encode { .. } => ErrorKind::Encode,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::NoData { .. } => ErrorKind::NoData,
            Self::Input { .. } => ErrorKind::Input,
        }
    }

    /// Returns the call that failed, if any single call did.
    pub fn call(&self) -> Option<Call> {
        match self {
            Self::Setup { .. } => Some(Call::Open),
            Self::Encode { .. } => Some(Call::Encode),
            Self::Decode { .. } => Some(Call::Decode),
            Self::Input { .. } => Some(Call::Read),
            Self::NoData { .. } => None,
        }
    }

    /// Returns the zero-based iteration the error occurred in.
    pub fn iteration(&self) -> Option<u64> {
        match self {
            Self::Encode { iteration, .. }
            | Self::Decode { iteration, .. }
            | Self::Input { iteration, .. } => Some(*iteration),
            Self::Setup { .. } | Self::NoData { .. } => None,
        }
    }

    /// Returns the name of the codec whose run failed.
    pub fn codec(&self) -> &str {
        match self {
            Self::Setup { codec, .. }
            | Self::Encode { codec, .. }
            | Self::Decode { codec, .. }
            | Self::NoData { codec }
            | Self::Input { codec, .. } => codec,
        }
    }
}
