//! FFI bindings to libopus.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_uchar};

/// Opaque encoder state.
pub enum OpusEncoder {}

/// Opaque decoder state.
pub enum OpusDecoder {}

/// opus_int32 type (from opus_types.h)
pub type OpusInt32 = i32;

/// opus_int16 type (from opus_types.h)
pub type OpusInt16 = i16;

// Return codes (opus_defines.h)
pub const OPUS_OK: c_int = 0;
#[cfg(test)]
pub const OPUS_BAD_ARG: c_int = -1;
#[cfg(test)]
pub const OPUS_BUFFER_TOO_SMALL: c_int = -2;
#[cfg(test)]
pub const OPUS_INVALID_PACKET: c_int = -4;

// Application types
pub const OPUS_APPLICATION_VOIP: c_int = 2048;
pub const OPUS_APPLICATION_AUDIO: c_int = 2049;
pub const OPUS_APPLICATION_RESTRICTED_LOWDELAY: c_int = 2051;

// CTL request codes
pub const OPUS_SET_BITRATE_REQUEST: c_int = 4002;
pub const OPUS_SET_COMPLEXITY_REQUEST: c_int = 4010;

unsafe extern "C" {
    pub fn opus_strerror(error: c_int) -> *const c_char;

    pub fn opus_encoder_create(
        fs: OpusInt32,
        channels: c_int,
        application: c_int,
        error: *mut c_int,
    ) -> *mut OpusEncoder;

    pub fn opus_encoder_destroy(enc: *mut OpusEncoder);

    pub fn opus_encode(
        enc: *mut OpusEncoder,
        pcm: *const OpusInt16,
        frame_size: c_int,
        data: *mut c_uchar,
        max_data_bytes: OpusInt32,
    ) -> OpusInt32;

    pub fn opus_encoder_ctl(enc: *mut OpusEncoder, request: c_int, ...) -> c_int;

    pub fn opus_decoder_create(
        fs: OpusInt32,
        channels: c_int,
        error: *mut c_int,
    ) -> *mut OpusDecoder;

    pub fn opus_decoder_destroy(dec: *mut OpusDecoder);

    pub fn opus_decode(
        dec: *mut OpusDecoder,
        data: *const c_uchar,
        len: OpusInt32,
        pcm: *mut OpusInt16,
        frame_size: c_int,
        decode_fec: c_int,
    ) -> c_int;
}

/// Formats an opus status code as "<library text> (<code>)".
pub fn error_string(error: c_int) -> String {
    // SAFETY: opus_strerror returns a pointer to a static string or null.
    let text = unsafe {
        let c_str = opus_strerror(error);
        if c_str.is_null() {
            None
        } else {
            Some(CStr::from_ptr(c_str).to_string_lossy().into_owned())
        }
    };
    match text {
        Some(text) => format!("{} ({})", text, error),
        None => format!("opus error {}", error),
    }
}
