//! Frame sources: a synthetic tone and raw PCM files.

use std::f64::consts::PI;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::Frame;

/// Default tone frequency in Hz.
pub const DEFAULT_TONE_HZ: f64 = 440.0;

/// Default tone amplitude (full 16-bit scale).
pub const DEFAULT_AMPLITUDE: f64 = 32767.0;

/// A pull source of fixed-length PCM frames.
pub trait SignalSource {
    /// Returns the number of samples in every frame this source yields.
    fn frame_samples(&self) -> usize;

    /// Returns the next frame, or `None` once no complete frame remains.
    fn next_frame(&mut self) -> io::Result<Option<Frame>>;

    /// Restarts the source so the same frames are produced again.
    fn rewind(&mut self) -> io::Result<()>;
}

fn check_frame_samples(frame_samples: usize) -> io::Result<()> {
    if frame_samples == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "frame length must be at least one sample",
        ));
    }
    Ok(())
}

/// Infinite sine tone.
///
/// Every sample is a pure function of its global index, so a rewound source
/// replays exactly the same frames.
#[derive(Debug, Clone)]
pub struct SineSource {
    sample_rate: u32,
    frame_samples: usize,
    freq: f64,
    amplitude: f64,
    index: u64,
}

impl SineSource {
    /// Creates a 440Hz full-scale tone.
    pub fn new(sample_rate: u32, frame_samples: usize) -> io::Result<Self> {
        Self::with_tone(sample_rate, frame_samples, DEFAULT_TONE_HZ, DEFAULT_AMPLITUDE)
    }

    /// Creates a tone of the given frequency and peak amplitude.
    pub fn with_tone(
        sample_rate: u32,
        frame_samples: usize,
        freq: f64,
        amplitude: f64,
    ) -> io::Result<Self> {
        check_frame_samples(frame_samples)?;
        if sample_rate == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "sample rate is zero"));
        }
        Ok(Self {
            sample_rate,
            frame_samples,
            freq,
            amplitude: amplitude.clamp(0.0, DEFAULT_AMPLITUDE),
            index: 0,
        })
    }

    /// Returns the sample at global index `n`.
    pub fn sample(&self, n: u64) -> i16 {
        let phase = 2.0 * PI * self.freq * n as f64 / self.sample_rate as f64;
        (self.amplitude * phase.sin()) as i16
    }

    /// Returns the global index of the next sample to be produced.
    pub fn position(&self) -> u64 {
        self.index
    }
}

impl SignalSource for SineSource {
    fn frame_samples(&self) -> usize {
        self.frame_samples
    }

    fn next_frame(&mut self) -> io::Result<Option<Frame>> {
        let start = self.index;
        let samples = (0..self.frame_samples as u64)
            .map(|i| self.sample(start + i))
            .collect();
        self.index += self.frame_samples as u64;
        Ok(Some(Frame::new(samples)))
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.index = 0;
        Ok(())
    }
}

/// Consecutive frames of headerless little-endian 16-bit PCM.
///
/// A trailing partial frame is end of input; it is dropped, not padded.
#[derive(Debug)]
pub struct FileSource<R> {
    reader: R,
    frame_samples: usize,
    buf: Vec<u8>,
    frames_read: u64,
    discarded_bytes: usize,
}

impl FileSource<BufReader<File>> {
    /// Opens a raw PCM file.
    pub fn open(path: impl AsRef<Path>, frame_samples: usize) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file), frame_samples)
    }
}

impl<R: Read + Seek> FileSource<R> {
    /// Wraps a seekable byte stream.
    pub fn new(reader: R, frame_samples: usize) -> io::Result<Self> {
        check_frame_samples(frame_samples)?;
        Ok(Self {
            reader,
            frame_samples,
            buf: vec![0u8; frame_samples * 2],
            frames_read: 0,
            discarded_bytes: 0,
        })
    }

    /// Returns how many complete frames have been read since the last rewind.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Returns the size of the trailing partial frame that was dropped, if
    /// end of input has been reached.
    pub fn discarded_bytes(&self) -> usize {
        self.discarded_bytes
    }

    fn fill(&mut self) -> io::Result<usize> {
        let mut filled = 0;
        while filled < self.buf.len() {
            match self.reader.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read + Seek> SignalSource for FileSource<R> {
    fn frame_samples(&self) -> usize {
        self.frame_samples
    }

    fn next_frame(&mut self) -> io::Result<Option<Frame>> {
        let filled = self.fill()?;
        if filled < self.buf.len() {
            if filled > 0 {
                self.discarded_bytes = filled;
            }
            return Ok(None);
        }
        self.frames_read += 1;
        Ok(Some(Frame::from_le_bytes(&self.buf)))
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.frames_read = 0;
        self.discarded_bytes = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn pcm_bytes(samples: impl IntoIterator<Item = i16>) -> Vec<u8> {
        samples.into_iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn test_sine_is_deterministic() {
        let mut a = SineSource::new(48000, 480).unwrap();
        let mut b = SineSource::new(48000, 480).unwrap();
        for _ in 0..50 {
            assert_eq!(a.next_frame().unwrap(), b.next_frame().unwrap());
        }
    }

    #[test]
    fn test_sine_rewind_replays() {
        let mut src = SineSource::new(48000, 480).unwrap();
        let first: Vec<Frame> = (0..5).map(|_| src.next_frame().unwrap().unwrap()).collect();
        assert_eq!(src.position(), 2400);

        src.rewind().unwrap();
        let again: Vec<Frame> = (0..5).map(|_| src.next_frame().unwrap().unwrap()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_sine_follows_global_index() {
        let mut src = SineSource::new(48000, 480).unwrap();
        src.next_frame().unwrap();
        let second = src.next_frame().unwrap().unwrap();
        // 440Hz does not divide 480 samples evenly, so frames differ.
        assert_eq!(second[0], src.sample(480));
        assert_ne!(second[0], src.sample(0));
    }

    #[test]
    fn test_sine_shape() {
        let src = SineSource::new(48000, 480).unwrap();
        assert_eq!(src.sample(0), 0);
        // Quarter period of 440Hz at 48kHz is ~27.27 samples.
        assert!(src.sample(27) > 32000);
        let peak = (0..48000).map(|n| src.sample(n)).max().unwrap();
        assert!(peak > 32700);
    }

    #[test]
    fn test_sine_never_ends() {
        let mut src = SineSource::new(8000, 80).unwrap();
        for _ in 0..1000 {
            assert!(src.next_frame().unwrap().is_some());
        }
    }

    #[test]
    fn test_zero_frame_length_rejected() {
        assert!(SineSource::new(48000, 0).is_err());
        assert!(FileSource::new(Cursor::new(Vec::new()), 0).is_err());
        assert!(SineSource::new(0, 480).is_err());
    }

    #[test]
    fn test_file_exact_multiple() {
        let data = pcm_bytes((0..1440).map(|i| i as i16));
        let mut src = FileSource::new(Cursor::new(data), 480).unwrap();

        for k in 0..3 {
            let frame = src.next_frame().unwrap().unwrap();
            assert_eq!(frame.len(), 480);
            assert_eq!(frame[0], (k * 480) as i16);
        }
        assert!(src.next_frame().unwrap().is_none());
        assert_eq!(src.frames_read(), 3);
        assert_eq!(src.discarded_bytes(), 0);
    }

    #[test]
    fn test_file_single_frame_then_end() {
        let mut src = FileSource::new(Cursor::new(pcm_bytes(vec![7i16; 480])), 480).unwrap();
        assert!(src.next_frame().unwrap().is_some());
        assert!(src.next_frame().unwrap().is_none());
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_file_partial_tail_discarded() {
        let mut src = FileSource::new(Cursor::new(pcm_bytes(vec![1i16; 680])), 480).unwrap();
        assert!(src.next_frame().unwrap().is_some());
        assert!(src.next_frame().unwrap().is_none());
        assert_eq!(src.discarded_bytes(), 400);
    }

    #[test]
    fn test_file_shorter_than_one_frame() {
        let mut src = FileSource::new(Cursor::new(pcm_bytes(vec![1i16; 200])), 480).unwrap();
        assert!(src.next_frame().unwrap().is_none());
        assert_eq!(src.frames_read(), 0);
    }

    #[test]
    fn test_file_rewind() {
        let data = pcm_bytes((0..960).map(|i| (i * 3) as i16));
        let mut src = FileSource::new(Cursor::new(data), 480).unwrap();
        let a = src.next_frame().unwrap().unwrap();
        src.next_frame().unwrap();
        assert!(src.next_frame().unwrap().is_none());

        src.rewind().unwrap();
        assert_eq!(src.frames_read(), 0);
        assert_eq!(src.next_frame().unwrap().unwrap(), a);
    }

    #[test]
    fn test_file_open_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &pcm_bytes(vec![-5i16; 960])).unwrap();

        let mut src = FileSource::open(file.path(), 480).unwrap();
        assert_eq!(src.next_frame().unwrap().unwrap()[0], -5);
        assert!(src.next_frame().unwrap().is_some());
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_file_open_missing() {
        let err = FileSource::open("/nonexistent/input.pcm", 480).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
