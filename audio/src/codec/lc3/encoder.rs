//! LC3 encoder.

use super::ffi::{self, Lc3Encoder as Lc3EncoderHandle};
use super::mem::StateMem;
use super::{frame_bytes, frame_samples, Lc3Error};
use crate::codec::Packet;

/// LC3 encoder owning its state memory.
pub struct Encoder {
    // Points into `mem`; valid for as long as `mem` is alive.
    handle: *mut Lc3EncoderHandle,
    mem: StateMem,
    frame_samples: usize,
    frame_bytes: usize,
}

// Safety: the handle and its memory are exclusively owned.
unsafe impl Send for Encoder {}

impl Encoder {
    /// Creates an encoder for `frame_us` frames at `sample_rate`, producing
    /// packets sized for `bitrate` bits per second.
    pub fn new(frame_us: u32, sample_rate: u32, bitrate: u32) -> Result<Self, Lc3Error> {
        let frame_samples = frame_samples(frame_us, sample_rate)?;
        let frame_bytes = frame_bytes(frame_us, bitrate)?;

        let size = unsafe { ffi::lc3_encoder_size(frame_us as i32, sample_rate as i32) };
        let mut mem = StateMem::new(size as usize)?;
        let handle = unsafe {
            ffi::lc3_setup_encoder(frame_us as i32, sample_rate as i32, 0, mem.as_mut_ptr())
        };
        if handle.is_null() {
            return Err(Lc3Error::SetupFailed("encoder"));
        }

        Ok(Self {
            handle,
            mem,
            frame_samples,
            frame_bytes,
        })
    }

    /// Returns the samples per frame.
    pub fn frame_samples(&self) -> usize {
        self.frame_samples
    }

    /// Returns the exact size of every packet this encoder produces.
    pub fn frame_bytes(&self) -> usize {
        self.frame_bytes
    }

    /// Returns the size of the state block handed to liblc3.
    pub fn state_size(&self) -> usize {
        self.mem.len()
    }

    /// Encodes one mono frame into `packet`.
    pub fn encode_into(&mut self, pcm: &[i16], packet: &mut Packet) -> Result<(), Lc3Error> {
        if pcm.len() < self.frame_samples || packet.capacity() < self.frame_bytes {
            return Err(Lc3Error::InvalidParams(format!(
                "need {} samples and {} packet bytes, got {} and {}",
                self.frame_samples,
                self.frame_bytes,
                pcm.len(),
                packet.capacity()
            )));
        }

        let rc = unsafe {
            ffi::lc3_encode(
                self.handle,
                ffi::LC3_PCM_FORMAT_S16,
                pcm.as_ptr().cast(),
                1,
                self.frame_bytes as i32,
                packet.buffer_mut().as_mut_ptr().cast(),
            )
        };
        if rc != 0 {
            packet.clear();
            return Err(Lc3Error::EncodeFailed(rc));
        }

        packet.set_len(self.frame_bytes);
        Ok(())
    }
}
