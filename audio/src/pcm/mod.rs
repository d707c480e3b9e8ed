//! PCM frames and the sources that produce them.
//!
//! # Key Types
//!
//! - [`Frame`]: one fixed-length chunk of 16-bit samples
//! - [`SignalSource`]: pull interface yielding frames until end of input
//! - [`SineSource`]: infinite, deterministic test tone
//! - [`FileSource`]: consecutive frames read from raw little-endian PCM

mod frame;
mod source;

pub use frame::Frame;
pub use source::{FileSource, SignalSource, SineSource, DEFAULT_AMPLITUDE, DEFAULT_TONE_HZ};
