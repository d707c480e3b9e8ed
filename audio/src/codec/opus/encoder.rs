//! Opus encoder handle.

use std::os::raw::c_int;
use std::ptr::NonNull;

use thiserror::Error;

use super::ffi;
use crate::codec::Packet;

/// Tuning profile passed to `opus_encoder_create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Application {
    /// Speech-oriented, favours intelligibility.
    Voip,
    /// General audio.
    #[default]
    Audio,
    /// Disables speech modes to shave algorithmic delay.
    LowDelay,
}

impl From<Application> for c_int {
    fn from(app: Application) -> c_int {
        match app {
            Application::Voip => ffi::OPUS_APPLICATION_VOIP,
            Application::Audio => ffi::OPUS_APPLICATION_AUDIO,
            Application::LowDelay => ffi::OPUS_APPLICATION_RESTRICTED_LOWDELAY,
        }
    }
}

#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("opus: create encoder: {0}")]
    Create(String),

    #[error("opus: encode: {0}")]
    Encode(String),

    #[error("opus: set {option}: {reason}")]
    Ctl { option: &'static str, reason: String },
}

/// Owned `OpusEncoder*`, destroyed on drop.
pub struct Encoder {
    handle: NonNull<ffi::OpusEncoder>,
    channels: usize,
}

// The handle is only touched through &mut self.
unsafe impl Send for Encoder {}

impl Encoder {
    /// Creates an encoder. libopus accepts 8, 12, 16, 24 and 48 kHz with one
    /// or two channels and reports anything else as `OPUS_BAD_ARG`.
    pub fn new(sample_rate: i32, channels: i32, application: Application) -> Result<Self, EncoderError> {
        let mut status: c_int = ffi::OPUS_OK;
        let raw = unsafe {
            ffi::opus_encoder_create(sample_rate, channels, application.into(), &mut status)
        };

        match NonNull::new(raw) {
            Some(handle) if status == ffi::OPUS_OK => Ok(Self {
                handle,
                channels: channels as usize,
            }),
            Some(handle) => {
                unsafe { ffi::opus_encoder_destroy(handle.as_ptr()) };
                Err(EncoderError::Create(ffi::error_string(status)))
            }
            None => Err(EncoderError::Create(ffi::error_string(status))),
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Encodes one interleaved frame into `packet` and returns its size.
    ///
    /// The packet's capacity bounds the output. On failure the packet is
    /// left empty.
    pub fn encode_into(&mut self, pcm: &[i16], packet: &mut Packet) -> Result<usize, EncoderError> {
        let per_channel = (pcm.len() / self.channels) as c_int;
        let out = packet.buffer_mut();
        let written = unsafe {
            ffi::opus_encode(
                self.handle.as_ptr(),
                pcm.as_ptr(),
                per_channel,
                out.as_mut_ptr(),
                out.len() as ffi::OpusInt32,
            )
        };

        if written < 0 {
            packet.clear();
            return Err(EncoderError::Encode(ffi::error_string(written)));
        }
        packet.set_len(written as usize);
        Ok(written as usize)
    }

    /// Target bitrate in bits per second.
    pub fn set_bitrate(&mut self, bps: i32) -> Result<(), EncoderError> {
        self.ctl("bitrate", ffi::OPUS_SET_BITRATE_REQUEST, bps)
    }

    /// Complexity from 0 (fastest) to 10.
    pub fn set_complexity(&mut self, complexity: i32) -> Result<(), EncoderError> {
        self.ctl("complexity", ffi::OPUS_SET_COMPLEXITY_REQUEST, complexity)
    }

    fn ctl(&mut self, option: &'static str, request: c_int, value: i32) -> Result<(), EncoderError> {
        let status = unsafe { ffi::opus_encoder_ctl(self.handle.as_ptr(), request, value) };
        if status != ffi::OPUS_OK {
            return Err(EncoderError::Ctl {
                option,
                reason: ffi::error_string(status),
            });
        }
        Ok(())
    }
}

impl Drop for Encoder {
    fn drop(&mut self) {
        unsafe { ffi::opus_encoder_destroy(self.handle.as_ptr()) };
    }
}
