//! LC3 (Low Complexity Communication Codec) via liblc3.
//!
//! Unlike Opus, liblc3 does not allocate: the caller sizes the encoder and
//! decoder state up front with `lc3_encoder_size` / `lc3_decoder_size` and
//! hands the library a block of that size. Packets have an exact length
//! derived from frame duration and bitrate. Calls return status codes rather
//! than sizes; the decoder returns `1` when it ran packet loss concealment.

mod ffi;
mod mem;
mod encoder;
mod decoder;

use thiserror::Error;

pub use encoder::Encoder;
pub use decoder::{DecodeStatus, Decoder};

/// LC3 error.
#[derive(Debug, Error)]
pub enum Lc3Error {
    /// Frame duration, sample rate or bitrate not supported.
    #[error("lc3: invalid parameters: {0}")]
    InvalidParams(String),
    /// State memory could not be allocated.
    #[error("lc3: failed to allocate {0} bytes of state memory")]
    AllocFailed(usize),
    /// `lc3_setup_encoder` / `lc3_setup_decoder` returned null.
    #[error("lc3: {0} setup failed")]
    SetupFailed(&'static str),
    /// `lc3_encode` returned a non-zero status.
    #[error("lc3: encode failed (rc={0})")]
    EncodeFailed(i32),
    /// `lc3_decode` returned a negative status.
    #[error("lc3: decode failed (rc={0})")]
    DecodeFailed(i32),
}

/// Returns the samples per channel in one frame.
pub fn frame_samples(frame_us: u32, sample_rate: u32) -> Result<usize, Lc3Error> {
    let n = unsafe { ffi::lc3_frame_samples(frame_us as i32, sample_rate as i32) };
    if n < 0 {
        return Err(Lc3Error::InvalidParams(format!(
            "frame duration {}us at {}Hz",
            frame_us, sample_rate
        )));
    }
    Ok(n as usize)
}

/// Returns the exact packet size for a frame duration and target bitrate.
pub fn frame_bytes(frame_us: u32, bitrate: u32) -> Result<usize, Lc3Error> {
    let n = unsafe { ffi::lc3_frame_bytes(frame_us as i32, bitrate as i32) };
    if n < 0 {
        return Err(Lc3Error::InvalidParams(format!(
            "bitrate {} for frame duration {}us",
            bitrate, frame_us
        )));
    }
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_samples() {
        assert_eq!(frame_samples(10_000, 48000).unwrap(), 480);
        assert_eq!(frame_samples(7_500, 48000).unwrap(), 360);
        assert_eq!(frame_samples(10_000, 16000).unwrap(), 160);
        assert!(frame_samples(10_000, 44000).is_err());
        assert!(frame_samples(3_000, 48000).is_err());
    }

    #[test]
    fn test_frame_bytes() {
        assert_eq!(frame_bytes(10_000, 32000).unwrap(), 40);
        assert_eq!(frame_bytes(10_000, 64000).unwrap(), 80);
        assert!(frame_bytes(3_000, 32000).is_err());
    }

    #[test]
    fn test_error_display() {
        assert!(Lc3Error::EncodeFailed(-1).to_string().contains("rc=-1"));
        assert!(Lc3Error::SetupFailed("encoder").to_string().contains("encoder setup"));
    }
}
