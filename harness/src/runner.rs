//! Benchmark runner.
//!
//! One run walks `Init -> Measuring -> Finalized`, or ends in `Failed`:
//!
//! - **Init**: open a session; a setup failure or a frame length that does
//!   not match the source fails the run before anything is measured.
//! - **Measuring**: pull a frame, time `encode`, time `decode`, record both.
//!   End of input or the iteration budget moves on to finalizing. Any
//!   encode, decode or read error fails the run and its partial totals are
//!   discarded.
//! - **Finalized**: means are `total / iterations` over integer nanoseconds;
//!   zero iterations is [`BenchError::NoData`].
//!
//! The session is dropped when `run` returns, whichever way it returns.
//! Timing uses [`Instant`], which is monotonic.

use std::time::{Duration, Instant};

use codecbench_audio::codec::Packet;
use codecbench_audio::pcm::SignalSource;
use tracing::{debug, trace};

use crate::adapter::{Codec, CodecSession};
use crate::config::CodecConfig;
use crate::error::{BenchError, CodecError};

/// Runner options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop after this many iterations; `None` runs until the source ends.
    pub iterations: Option<u64>,
}

/// Outcome of one decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureStatus {
    Decoded,
    Concealed,
}

/// Timing of one encode/decode round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub encode: Duration,
    pub decode: Duration,
    pub packet_bytes: usize,
    pub status: MeasureStatus,
}

/// Aggregate over every iteration of one codec run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub codec: String,
    pub iterations: u64,
    pub encode_total: Duration,
    pub decode_total: Duration,
    pub encode_mean: Duration,
    pub decode_mean: Duration,
    pub encode_min: Duration,
    pub encode_max: Duration,
    pub decode_min: Duration,
    pub decode_max: Duration,
    /// Iterations where the decoder ran packet loss concealment.
    pub concealed: u64,
    pub packet_bytes: u64,
}

impl BenchmarkResult {
    /// Returns the average encoded packet size in bytes.
    pub fn mean_packet_bytes(&self) -> f64 {
        self.packet_bytes as f64 / self.iterations as f64
    }
}

/// Running totals for one run. Created fresh by every `run` call.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    iterations: u64,
    encode_total: Duration,
    decode_total: Duration,
    encode_min: Option<Duration>,
    encode_max: Duration,
    decode_min: Option<Duration>,
    decode_max: Duration,
    concealed: u64,
    packet_bytes: u64,
}

impl Accumulator {
    pub(crate) fn record(&mut self, m: &Measurement) {
        self.iterations += 1;
        self.encode_total += m.encode;
        self.decode_total += m.decode;
        self.encode_min = Some(self.encode_min.map_or(m.encode, |d| d.min(m.encode)));
        self.decode_min = Some(self.decode_min.map_or(m.decode, |d| d.min(m.decode)));
        self.encode_max = self.encode_max.max(m.encode);
        self.decode_max = self.decode_max.max(m.decode);
        self.packet_bytes += m.packet_bytes as u64;
        if m.status == MeasureStatus::Concealed {
            self.concealed += 1;
        }
    }

    pub(crate) fn iterations(&self) -> u64 {
        self.iterations
    }

    pub(crate) fn finish(self, codec: &str) -> Result<BenchmarkResult, BenchError> {
        if self.iterations == 0 {
            return Err(BenchError::NoData {
                codec: codec.to_string(),
            });
        }
        Ok(BenchmarkResult {
            codec: codec.to_string(),
            iterations: self.iterations,
            encode_total: self.encode_total,
            decode_total: self.decode_total,
            encode_mean: mean(self.encode_total, self.iterations),
            decode_mean: mean(self.decode_total, self.iterations),
            encode_min: self.encode_min.unwrap_or_default(),
            encode_max: self.encode_max,
            decode_min: self.decode_min.unwrap_or_default(),
            decode_max: self.decode_max,
            concealed: self.concealed,
            packet_bytes: self.packet_bytes,
        })
    }
}

fn mean(total: Duration, count: u64) -> Duration {
    Duration::from_nanos((total.as_nanos() / count as u128) as u64)
}

/// Drives encode/decode iterations through a codec session.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    options: RunOptions,
}

impl Runner {
    /// Creates a runner.
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Benchmarks `codec` over frames pulled from `source`.
    pub fn run(
        &self,
        codec: &dyn Codec,
        config: &CodecConfig,
        source: &mut dyn SignalSource,
    ) -> Result<BenchmarkResult, BenchError> {
        let name = codec.name();

        let mut session = codec.open(config).map_err(|e| BenchError::Setup {
            codec: name.to_string(),
            reason: e.reason().to_string(),
        })?;

        let frame_samples = session.frame_samples();
        if frame_samples != source.frame_samples() {
            return Err(BenchError::Setup {
                codec: name.to_string(),
                reason: format!(
                    "codec frame is {} samples but source frame is {}",
                    frame_samples,
                    source.frame_samples()
                ),
            });
        }

        let mut packet = Packet::with_capacity(session.max_packet_bytes());
        let mut out = vec![0i16; frame_samples];
        let mut acc = Accumulator::default();

        debug!(codec = name, frame_samples, limit = ?self.options.iterations, "measuring");

        loop {
            if self.options.iterations.is_some_and(|limit| acc.iterations() >= limit) {
                break;
            }
            let iteration = acc.iterations();

            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    debug!(codec = name, iteration, "end of input");
                    break;
                }
                Err(e) => {
                    return Err(BenchError::Input {
                        codec: name.to_string(),
                        iteration,
                        source: e,
                    });
                }
            };

            let m = measure(session.as_mut(), &frame, &mut packet, &mut out)
                .map_err(|e| call_error(name, iteration, e))?;

            trace!(
                iteration,
                encode_ns = m.encode.as_nanos() as u64,
                decode_ns = m.decode.as_nanos() as u64,
                packet_bytes = m.packet_bytes,
                "iteration"
            );
            if m.status == MeasureStatus::Concealed {
                debug!(codec = name, iteration, "decoder performed PLC");
            }
            acc.record(&m);
        }

        let result = acc.finish(name)?;
        debug!(
            codec = name,
            iterations = result.iterations,
            encode_mean_ns = result.encode_mean.as_nanos() as u64,
            decode_mean_ns = result.decode_mean.as_nanos() as u64,
            "finalized"
        );
        Ok(result)
    }
}

fn measure(
    session: &mut dyn CodecSession,
    frame: &[i16],
    packet: &mut Packet,
    out: &mut [i16],
) -> Result<Measurement, CodecError> {
    let start = Instant::now();
    let encoded = session.encode(frame, packet);
    let encode = start.elapsed();
    encoded?;

    let start = Instant::now();
    let decoded = session.decode(packet, out);
    let decode = start.elapsed();
    let decoded = decoded?;

    Ok(Measurement {
        encode,
        decode,
        packet_bytes: packet.len(),
        status: if decoded.concealed {
            MeasureStatus::Concealed
        } else {
            MeasureStatus::Decoded
        },
    })
}

fn call_error(codec: &str, iteration: u64, e: CodecError) -> BenchError {
    let codec = codec.to_string();
    match e {
        CodecError::Encode(reason) => BenchError::Encode {
            codec,
            iteration,
            reason,
        },
        CodecError::Decode(reason) => BenchError::Decode {
            codec,
            iteration,
            reason,
        },
        CodecError::Setup(reason) => BenchError::Setup { codec, reason },
    }
}
