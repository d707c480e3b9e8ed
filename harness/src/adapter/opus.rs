//! Opus adapter.
//!
//! libopus signals through signed returns: encode yields the packet size or
//! a negative error code, decode is handed the exact packet length and
//! yields the sample count or a negative error code. An empty packet means
//! the packet was lost and the decoder conceals it.

use codecbench_audio::codec::Packet;
use codecbench_audio::codec::opus::{
    self, Application, Decoder, DecoderError, Encoder, EncoderError,
};
use tracing::debug;

use super::{require_mono, Codec, CodecSession, Decoded};
use crate::config::{CodecConfig, OpusApplication};
use crate::error::CodecError;

/// Variable-bitrate Opus backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpusCodec;

impl Codec for OpusCodec {
    fn name(&self) -> &str {
        "Opus"
    }

    fn open(&self, config: &CodecConfig) -> Result<Box<dyn CodecSession>, CodecError> {
        Ok(Box::new(OpusSession::open(config)?))
    }
}

struct OpusSession {
    encoder: Encoder,
    decoder: Decoder,
    frame_samples: usize,
    max_packet_bytes: usize,
}

impl OpusSession {
    fn open(config: &CodecConfig) -> Result<Self, CodecError> {
        require_mono(config)?;
        if !matches!(config.frame_us, 2_500 | 5_000 | 10_000 | 20_000 | 40_000 | 60_000) {
            return Err(CodecError::Setup(format!(
                "frame duration {}us is not an Opus frame size",
                config.frame_us
            )));
        }

        let frame_samples = opus::frame_samples(config.sample_rate, config.frame_us);
        let application = match config.opus_application {
            OpusApplication::Voip => Application::Voip,
            OpusApplication::Audio => Application::Audio,
            OpusApplication::Lowdelay => Application::LowDelay,
        };

        let mut encoder = Encoder::new(config.sample_rate as i32, 1, application)
            .map_err(setup_error)?;
        if config.bitrate > 0 {
            encoder.set_bitrate(config.bitrate as i32).map_err(setup_error)?;
        }
        if let Some(complexity) = config.opus_complexity {
            encoder.set_complexity(complexity).map_err(setup_error)?;
        }
        let decoder = Decoder::new(config.sample_rate as i32, 1)
            .map_err(|e| CodecError::Setup(e.to_string()))?;

        debug!(
            frame_samples,
            max_packet_bytes = config.max_packet_bytes,
            bitrate = config.bitrate,
            ?application,
            "opus session opened"
        );

        Ok(Self {
            encoder,
            decoder,
            frame_samples,
            max_packet_bytes: config.max_packet_bytes,
        })
    }
}

fn setup_error(e: EncoderError) -> CodecError {
    CodecError::Setup(e.to_string())
}

impl CodecSession for OpusSession {
    fn frame_samples(&self) -> usize {
        self.frame_samples
    }

    fn max_packet_bytes(&self) -> usize {
        self.max_packet_bytes
    }

    fn encode(&mut self, pcm: &[i16], packet: &mut Packet) -> Result<(), CodecError> {
        match self.encoder.encode_into(pcm, packet) {
            Ok(_) => Ok(()),
            Err(EncoderError::Encode(reason)) => Err(CodecError::Encode(reason)),
            Err(e) => Err(CodecError::Encode(e.to_string())),
        }
    }

    fn decode(&mut self, packet: &Packet, out: &mut [i16]) -> Result<Decoded, CodecError> {
        let n = self.frame_samples.min(out.len());
        let frame = &mut out[..n];
        let samples = self.decoder.decode_into(packet, frame).map_err(|e| match e {
            DecoderError::Decode(reason) => CodecError::Decode(reason),
            other => CodecError::Decode(other.to_string()),
        })?;
        if samples != self.frame_samples {
            return Err(CodecError::Decode(format!(
                "decoded {} samples, expected {}",
                samples, self.frame_samples
            )));
        }
        Ok(Decoded {
            samples,
            concealed: packet.is_empty(),
        })
    }
}
