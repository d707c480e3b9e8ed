//! PCM frames, signal sources and native codec bindings.
//!
//! This crate provides the audio side of the codec benchmark:
//!
//! - `pcm`: fixed-length sample frames and the sources that produce them
//! - `codec`: encoded packets plus libopus and liblc3 wrappers
//!
//! # Example
//!
//! ```rust
//! use codecbench_audio::pcm::{SignalSource, SineSource};
//!
//! // 10ms frames of a 440Hz tone at 48kHz
//! let mut source = SineSource::new(48000, 480).unwrap();
//! let frame = source.next_frame().unwrap().unwrap();
//! assert_eq!(frame.len(), 480);
//! ```

pub mod codec;
pub mod pcm;

pub use codec::Packet;
pub use pcm::Frame;
