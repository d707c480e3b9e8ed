//! LC3 adapter.
//!
//! liblc3 needs its state blocks sized from frame duration and sample rate
//! before setup, and the packet size computed from frame duration and
//! bitrate before encoding. Encode returns `0` on success. Decode returns
//! `0` on success, `1` when it concealed the frame, negative on failure.

use codecbench_audio::codec::Packet;
use codecbench_audio::codec::lc3::{DecodeStatus, Decoder, Encoder, Lc3Error};
use tracing::debug;

use super::{require_mono, Codec, CodecSession, Decoded};
use crate::config::CodecConfig;
use crate::error::CodecError;

/// Fixed-frame LC3 backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lc3Codec;

impl Codec for Lc3Codec {
    fn name(&self) -> &str {
        "LC3"
    }

    fn open(&self, config: &CodecConfig) -> Result<Box<dyn CodecSession>, CodecError> {
        Ok(Box::new(Lc3Session::open(config)?))
    }
}

struct Lc3Session {
    encoder: Encoder,
    decoder: Decoder,
}

impl Lc3Session {
    fn open(config: &CodecConfig) -> Result<Self, CodecError> {
        require_mono(config)?;

        let setup = |e: Lc3Error| CodecError::Setup(e.to_string());
        let encoder = Encoder::new(config.frame_us, config.sample_rate, config.bitrate).map_err(setup)?;
        let decoder = Decoder::new(config.frame_us, config.sample_rate).map_err(setup)?;

        debug!(
            frame_samples = encoder.frame_samples(),
            frame_bytes = encoder.frame_bytes(),
            encoder_state = encoder.state_size(),
            decoder_state = decoder.state_size(),
            "lc3 session opened"
        );

        Ok(Self { encoder, decoder })
    }
}

impl CodecSession for Lc3Session {
    fn frame_samples(&self) -> usize {
        self.encoder.frame_samples()
    }

    fn max_packet_bytes(&self) -> usize {
        self.encoder.frame_bytes()
    }

    fn encode(&mut self, pcm: &[i16], packet: &mut Packet) -> Result<(), CodecError> {
        self.encoder.encode_into(pcm, packet).map_err(|e| match e {
            Lc3Error::EncodeFailed(rc) => CodecError::Encode(format!("rc={}", rc)),
            other => CodecError::Encode(other.to_string()),
        })
    }

    fn decode(&mut self, packet: &Packet, out: &mut [i16]) -> Result<Decoded, CodecError> {
        let status = self.decoder.decode_into(packet, out).map_err(|e| match e {
            Lc3Error::DecodeFailed(rc) => CodecError::Decode(format!("rc={}", rc)),
            other => CodecError::Decode(other.to_string()),
        })?;
        Ok(Decoded {
            samples: self.decoder.frame_samples(),
            concealed: status == DecodeStatus::Concealed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codecbench_audio::pcm::{SignalSource, SineSource};

    #[test]
    fn test_open_computes_sizes() {
        let session = Lc3Codec.open(&CodecConfig::default()).unwrap();
        assert_eq!(session.frame_samples(), 480);
        assert_eq!(session.max_packet_bytes(), 40);

        let config = CodecConfig {
            bitrate: 64000,
            ..CodecConfig::default()
        };
        assert_eq!(Lc3Codec.open(&config).unwrap().max_packet_bytes(), 80);
    }

    #[test]
    fn test_roundtrip_no_concealment() {
        let mut session = Lc3Codec.open(&CodecConfig::default()).unwrap();
        let mut source = SineSource::new(48000, 480).unwrap();
        let mut packet = Packet::with_capacity(session.max_packet_bytes());
        let mut out = vec![0i16; 480];

        for _ in 0..50 {
            let frame = source.next_frame().unwrap().unwrap();
            session.encode(&frame, &mut packet).unwrap();
            assert_eq!(packet.len(), 40);
            let decoded = session.decode(&packet, &mut out).unwrap();
            assert!(!decoded.concealed);
        }
    }

    #[test]
    fn test_lost_packet_is_concealed() {
        let mut session = Lc3Codec.open(&CodecConfig::default()).unwrap();
        let mut out = vec![0i16; 480];
        let decoded = session.decode(&Packet::with_capacity(0), &mut out).unwrap();
        assert!(decoded.concealed);
        assert_eq!(decoded.samples, 480);
    }

    #[test]
    fn test_invalid_rate_is_setup_error() {
        let config = CodecConfig {
            sample_rate: 44100,
            ..CodecConfig::default()
        };
        assert!(matches!(Lc3Codec.open(&config), Err(CodecError::Setup(_))));
    }

    #[test]
    fn test_stereo_is_setup_error() {
        let config = CodecConfig {
            channels: 2,
            ..CodecConfig::default()
        };
        assert!(matches!(Lc3Codec.open(&config), Err(CodecError::Setup(_))));
    }

    #[test]
    fn test_undersized_packet_is_decode_error() {
        let mut session = Lc3Codec.open(&CodecConfig::default()).unwrap();
        let mut out = vec![0i16; 480];
        let err = session.decode(&Packet::from_slice(&[1, 2, 3]), &mut out).unwrap_err();
        assert_eq!(err, CodecError::Decode("rc=-1".to_string()));
    }
}
