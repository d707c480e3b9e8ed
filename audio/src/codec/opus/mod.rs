//! Opus audio codec via libopus.
//!
//! Opus reports encoded sizes through signed return values: a non-negative
//! result is the byte (or sample) count, a negative one is an error code that
//! `opus_strerror` can describe.
//!
//! # Example
//!
//! ```ignore
//! use codecbench_audio::codec::Packet;
//! use codecbench_audio::codec::opus::{Application, Decoder, Encoder};
//!
//! let mut encoder = Encoder::new(48000, 1, Application::Audio)?;
//! encoder.set_bitrate(32000)?;
//! let mut decoder = Decoder::new(48000, 1)?;
//!
//! let pcm = vec![0i16; 480]; // 10ms at 48kHz
//! let mut packet = Packet::with_capacity(1000);
//! encoder.encode_into(&pcm, &mut packet)?;
//!
//! let mut out = vec![0i16; 480];
//! let samples = decoder.decode_into(&packet, &mut out)?;
//! ```

mod ffi;
mod encoder;
mod decoder;

pub use encoder::*;
pub use decoder::*;

/// Largest packet the harness asks libopus to produce.
pub const MAX_PACKET_SIZE: usize = 1000;

/// Returns the samples per channel in a frame of `frame_us` microseconds.
pub fn frame_samples(sample_rate: u32, frame_us: u32) -> usize {
    (sample_rate as u64 * frame_us as u64 / 1_000_000) as usize
}
