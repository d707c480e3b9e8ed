//! LC3 decoder.

use std::ptr;

use super::ffi::{self, Lc3Decoder as Lc3DecoderHandle};
use super::mem::StateMem;
use super::{frame_samples, Lc3Error};
use crate::codec::Packet;

/// Outcome of a successful decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The packet was decoded normally.
    Decoded,
    /// The decoder substituted concealment output.
    Concealed,
}

/// LC3 decoder owning its state memory.
pub struct Decoder {
    // Points into `mem`; valid for as long as `mem` is alive.
    handle: *mut Lc3DecoderHandle,
    mem: StateMem,
    frame_samples: usize,
}

// Safety: the handle and its memory are exclusively owned.
unsafe impl Send for Decoder {}

impl Decoder {
    /// Creates a decoder for `frame_us` frames at `sample_rate`.
    pub fn new(frame_us: u32, sample_rate: u32) -> Result<Self, Lc3Error> {
        let frame_samples = frame_samples(frame_us, sample_rate)?;

        let size = unsafe { ffi::lc3_decoder_size(frame_us as i32, sample_rate as i32) };
        let mut mem = StateMem::new(size as usize)?;
        let handle = unsafe {
            ffi::lc3_setup_decoder(frame_us as i32, sample_rate as i32, 0, mem.as_mut_ptr())
        };
        if handle.is_null() {
            return Err(Lc3Error::SetupFailed("decoder"));
        }

        Ok(Self {
            handle,
            mem,
            frame_samples,
        })
    }

    /// Returns the samples per frame.
    pub fn frame_samples(&self) -> usize {
        self.frame_samples
    }

    /// Returns the size of the state block handed to liblc3.
    pub fn state_size(&self) -> usize {
        self.mem.len()
    }

    /// Decodes one packet into `out`. An empty packet runs concealment.
    pub fn decode_into(&mut self, packet: &Packet, out: &mut [i16]) -> Result<DecodeStatus, Lc3Error> {
        if out.len() < self.frame_samples {
            return Err(Lc3Error::InvalidParams(format!(
                "output holds {} samples, frame needs {}",
                out.len(),
                self.frame_samples
            )));
        }

        let input = if packet.is_empty() {
            ptr::null()
        } else {
            packet.as_bytes().as_ptr().cast()
        };

        let rc = unsafe {
            ffi::lc3_decode(
                self.handle,
                input,
                packet.len() as i32,
                ffi::LC3_PCM_FORMAT_S16,
                out.as_mut_ptr().cast(),
                1,
            )
        };

        match rc {
            0 => Ok(DecodeStatus::Decoded),
            ffi::LC3_DECODE_PLC => Ok(DecodeStatus::Concealed),
            rc => Err(Lc3Error::DecodeFailed(rc)),
        }
    }
}
