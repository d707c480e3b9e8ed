//! Encoded packet buffer.

/// Compressed bytes for one encoded frame.
///
/// The backing storage is allocated once with the codec's maximum packet
/// size and reused; each encode sets the valid length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    buf: Vec<u8>,
    len: usize,
}

impl Packet {
    /// Creates an empty packet able to hold `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity],
            len: 0,
        }
    }

    /// Creates a packet holding a copy of `data`.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            buf: data.to_vec(),
            len: data.len(),
        }
    }

    /// Returns the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the packet carries no payload.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the maximum number of bytes an encoder may write.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the whole backing buffer for an encoder to write into.
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Sets the number of valid bytes after an encoder wrote into the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the capacity.
    pub fn set_len(&mut self, len: usize) {
        assert!(len <= self.buf.len(), "packet length {len} exceeds capacity {}", self.buf.len());
        self.len = len;
    }

    /// Marks the packet as lost (no payload).
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_capacity_is_empty() {
        let p = Packet::with_capacity(1000);
        assert!(p.is_empty());
        assert_eq!(p.capacity(), 1000);
        assert!(p.as_bytes().is_empty());
    }

    #[test]
    fn test_set_len_exposes_written_bytes() {
        let mut p = Packet::with_capacity(8);
        p.buffer_mut()[..3].copy_from_slice(&[1, 2, 3]);
        p.set_len(3);
        assert_eq!(p.as_bytes(), &[1, 2, 3]);

        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.capacity(), 8);
    }

    #[test]
    #[should_panic]
    fn test_set_len_past_capacity() {
        let mut p = Packet::with_capacity(4);
        p.set_len(5);
    }

    #[test]
    fn test_from_slice() {
        let p = Packet::from_slice(&[0xfc, 0xff]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.as_bytes()[0], 0xfc);
    }
}
