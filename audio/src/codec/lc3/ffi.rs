//! FFI bindings to liblc3.

use std::os::raw::{c_int, c_uint, c_void};

/// Opaque encoder state, placed inside caller-provided memory.
pub enum Lc3Encoder {}

/// Opaque decoder state, placed inside caller-provided memory.
pub enum Lc3Decoder {}

// enum lc3_pcm_format
pub const LC3_PCM_FORMAT_S16: c_int = 0;

/// Status returned by `lc3_decode` when packet loss concealment ran.
pub const LC3_DECODE_PLC: c_int = 1;

unsafe extern "C" {
    pub fn lc3_frame_samples(dt_us: c_int, sr_hz: c_int) -> c_int;
    pub fn lc3_frame_bytes(dt_us: c_int, bitrate: c_int) -> c_int;

    pub fn lc3_encoder_size(dt_us: c_int, sr_hz: c_int) -> c_uint;
    pub fn lc3_setup_encoder(
        dt_us: c_int,
        sr_hz: c_int,
        sr_pcm_hz: c_int,
        mem: *mut c_void,
    ) -> *mut Lc3Encoder;
    pub fn lc3_encode(
        encoder: *mut Lc3Encoder,
        fmt: c_int,
        pcm: *const c_void,
        stride: c_int,
        nbytes: c_int,
        out: *mut c_void,
    ) -> c_int;

    pub fn lc3_decoder_size(dt_us: c_int, sr_hz: c_int) -> c_uint;
    pub fn lc3_setup_decoder(
        dt_us: c_int,
        sr_hz: c_int,
        sr_pcm_hz: c_int,
        mem: *mut c_void,
    ) -> *mut Lc3Decoder;
    pub fn lc3_decode(
        decoder: *mut Lc3Decoder,
        input: *const c_void,
        nbytes: c_int,
        fmt: c_int,
        pcm: *mut c_void,
        stride: c_int,
    ) -> c_int;
}
