//! Opus decoder handle.

use std::os::raw::c_int;
use std::ptr::{self, NonNull};

use thiserror::Error;

use super::ffi;
use crate::codec::Packet;

#[derive(Debug, Error)]
pub enum DecoderError {
    #[error("opus: create decoder: {0}")]
    Create(String),

    #[error("opus: decode: {0}")]
    Decode(String),
}

/// Owned `OpusDecoder*`, destroyed on drop.
pub struct Decoder {
    handle: NonNull<ffi::OpusDecoder>,
    channels: usize,
}

// The handle is only touched through &mut self.
unsafe impl Send for Decoder {}

impl Decoder {
    pub fn new(sample_rate: i32, channels: i32) -> Result<Self, DecoderError> {
        let mut status: c_int = ffi::OPUS_OK;
        let raw = unsafe { ffi::opus_decoder_create(sample_rate, channels, &mut status) };

        match NonNull::new(raw) {
            Some(handle) if status == ffi::OPUS_OK => Ok(Self {
                handle,
                channels: channels as usize,
            }),
            Some(handle) => {
                unsafe { ffi::opus_decoder_destroy(handle.as_ptr()) };
                Err(DecoderError::Create(ffi::error_string(status)))
            }
            None => Err(DecoderError::Create(ffi::error_string(status))),
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Decodes `packet` into `out` and returns samples per channel.
    ///
    /// `out` bounds the frame the decoder may produce. An empty packet
    /// counts as lost: libopus is given a null pointer and conceals a frame
    /// the size of `out`.
    pub fn decode_into(&mut self, packet: &Packet, out: &mut [i16]) -> Result<usize, DecoderError> {
        let data = if packet.is_empty() {
            ptr::null()
        } else {
            packet.as_bytes().as_ptr()
        };
        let capacity = (out.len() / self.channels) as c_int;

        let decoded = unsafe {
            ffi::opus_decode(
                self.handle.as_ptr(),
                data,
                packet.len() as ffi::OpusInt32,
                out.as_mut_ptr(),
                capacity,
                0,
            )
        };

        if decoded < 0 {
            return Err(DecoderError::Decode(ffi::error_string(decoded)));
        }
        Ok(decoded as usize)
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        unsafe { ffi::opus_decoder_destroy(self.handle.as_ptr()) };
    }
}
