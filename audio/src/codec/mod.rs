//! Audio codec bindings.
//!
//! - `opus`: Opus audio codec (RFC 6716) via libopus
//! - `lc3`: Low Complexity Communication Codec via liblc3
//!
//! Each backend sits behind a cargo feature of the same name so the rest of
//! the crate builds without the native libraries installed.

mod packet;

#[cfg(feature = "opus")]
pub mod opus;
#[cfg(feature = "lc3")]
pub mod lc3;

pub use packet::Packet;
