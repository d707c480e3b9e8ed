//! PCM frame type.

use std::ops::Deref;

/// One frame of signed 16-bit PCM samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Vec<i16>);

impl Frame {
    /// Creates a frame from samples.
    pub fn new(samples: Vec<i16>) -> Self {
        Self(samples)
    }

    /// Decodes little-endian 16-bit samples from bytes. A trailing odd byte
    /// is ignored.
    pub fn from_le_bytes(data: &[u8]) -> Self {
        Self(
            data.chunks_exact(2)
                .map(|b| i16::from_le_bytes([b[0], b[1]]))
                .collect(),
        )
    }

    /// Returns the samples.
    pub fn samples(&self) -> &[i16] {
        &self.0
    }

    /// Consumes the frame and returns its samples.
    pub fn into_samples(self) -> Vec<i16> {
        self.0
    }
}

impl Deref for Frame {
    type Target = [i16];

    fn deref(&self) -> &[i16] {
        &self.0
    }
}

impl From<Vec<i16>> for Frame {
    fn from(samples: Vec<i16>) -> Self {
        Self(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_le_bytes() {
        let frame = Frame::from_le_bytes(&[0x01, 0x00, 0xff, 0xff, 0x00, 0x80]);
        assert_eq!(frame.samples(), &[1, -1, i16::MIN]);
    }

    #[test]
    fn test_from_le_bytes_odd_tail() {
        let frame = Frame::from_le_bytes(&[0x10, 0x00, 0x7f]);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0], 16);
    }

    #[test]
    fn test_into_samples() {
        let frame = Frame::from(vec![3, 4]);
        assert_eq!(frame.into_samples(), vec![3, 4]);
    }
}
