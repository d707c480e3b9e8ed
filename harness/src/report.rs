//! Report formatting.
//!
//! Text output is meant for a terminal; JSON output writes one object per
//! codec per line so it can be piped into other tools.

use std::io::{self, Write};
use std::time::Duration;

use serde::Serialize;

use crate::error::{BenchError, Call, ErrorKind};
use crate::runner::BenchmarkResult;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Serialize)]
struct Record<'a> {
    codec: &'a str,
    ok: bool,
    #[serde(flatten)]
    stats: Option<Stats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorRecord>,
}

#[derive(Debug, Serialize)]
struct Stats {
    iterations: u64,
    encode_mean_us: f64,
    decode_mean_us: f64,
    encode_min_us: f64,
    encode_max_us: f64,
    decode_min_us: f64,
    decode_max_us: f64,
    mean_packet_bytes: f64,
    concealed: u64,
}

#[derive(Debug, Serialize)]
struct ErrorRecord {
    kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    call: Option<Call>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iteration: Option<u64>,
    message: String,
}

fn micros(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1e3
}

impl From<&BenchmarkResult> for Stats {
    fn from(r: &BenchmarkResult) -> Self {
        Self {
            iterations: r.iterations,
            encode_mean_us: micros(r.encode_mean),
            decode_mean_us: micros(r.decode_mean),
            encode_min_us: micros(r.encode_min),
            encode_max_us: micros(r.encode_max),
            decode_min_us: micros(r.decode_min),
            decode_max_us: micros(r.decode_max),
            mean_packet_bytes: r.mean_packet_bytes(),
            concealed: r.concealed,
        }
    }
}

impl From<&BenchError> for ErrorRecord {
    fn from(e: &BenchError) -> Self {
        Self {
            kind: e.kind(),
            call: e.call(),
            iteration: e.iteration(),
            message: e.to_string(),
        }
    }
}

/// Writes the outcome of one codec run.
pub fn present(
    out: &mut dyn Write,
    codec: &str,
    outcome: &Result<BenchmarkResult, BenchError>,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => present_text(out, codec, outcome),
        OutputFormat::Json => {
            let record = match outcome {
                Ok(r) => Record {
                    codec,
                    ok: true,
                    stats: Some(r.into()),
                    error: None,
                },
                Err(e) => Record {
                    codec,
                    ok: false,
                    stats: None,
                    error: Some(e.into()),
                },
            };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)
        }
    }
}

fn present_text(
    out: &mut dyn Write,
    codec: &str,
    outcome: &Result<BenchmarkResult, BenchError>,
) -> io::Result<()> {
    writeln!(out, "Testing {} codec...", codec)?;
    match outcome {
        Ok(r) => {
            writeln!(out, "Loop Count: {}", r.iterations)?;
            writeln!(out, "{} test successful!", codec)?;
            writeln!(out, "Avg Encoding time {:.3} µs", micros(r.encode_mean))?;
            writeln!(out, "Avg Decoding time {:.3} µs", micros(r.decode_mean))?;
            writeln!(
                out,
                "Min/Max Encoding time {:.3} / {:.3} µs",
                micros(r.encode_min),
                micros(r.encode_max)
            )?;
            writeln!(
                out,
                "Min/Max Decoding time {:.3} / {:.3} µs",
                micros(r.decode_min),
                micros(r.decode_max)
            )?;
            writeln!(out, "Avg packet size {:.1} bytes", r.mean_packet_bytes())?;
            if r.concealed > 0 {
                writeln!(out, "Decoder performed PLC on {} of {} frames", r.concealed, r.iterations)?;
            }
        }
        Err(e) => {
            write!(out, "{} test failed: {}", codec, e.kind())?;
            if let Some(call) = e.call() {
                write!(out, " in {}", call)?;
            }
            if let Some(iteration) = e.iteration() {
                write!(out, " at iteration {}", iteration)?;
            }
            writeln!(out)?;
            writeln!(out, "  {}", e)?;
        }
    }
    writeln!(out)
}

/// Writes the closing line naming any failed codecs.
pub fn summary(out: &mut dyn Write, failed: &[String], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text if failed.is_empty() => {
            writeln!(out, "All codec tests passed successfully!")
        }
        OutputFormat::Text => writeln!(out, "Failed codec tests: {}", failed.join(", ")),
        OutputFormat::Json => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> BenchmarkResult {
        BenchmarkResult {
            codec: "Opus".to_string(),
            iterations: 100,
            encode_total: Duration::from_micros(1234),
            decode_total: Duration::from_micros(321),
            encode_mean: Duration::from_nanos(12_340),
            decode_mean: Duration::from_nanos(3_210),
            encode_min: Duration::from_micros(10),
            encode_max: Duration::from_micros(40),
            decode_min: Duration::from_micros(2),
            decode_max: Duration::from_micros(9),
            concealed: 0,
            packet_bytes: 4000,
        }
    }

    fn render(outcome: &Result<BenchmarkResult, BenchError>, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        present(&mut buf, "Opus", outcome, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_success() {
        let text = render(&Ok(result()), OutputFormat::Text);
        assert!(text.starts_with("Testing Opus codec...\n"));
        assert!(text.contains("Loop Count: 100\n"));
        assert!(text.contains("Avg Encoding time 12.340 µs\n"));
        assert!(text.contains("Avg Decoding time 3.210 µs\n"));
        assert!(text.contains("Avg packet size 40.0 bytes\n"));
        assert!(!text.contains("PLC"));
    }

    #[test]
    fn test_text_concealment_notice() {
        let mut r = result();
        r.concealed = 3;
        let text = render(&Ok(r), OutputFormat::Text);
        assert!(text.contains("Decoder performed PLC on 3 of 100 frames"));
    }

    #[test]
    fn test_text_failure_names_call_and_iteration() {
        let err = BenchError::Encode {
            codec: "Opus".to_string(),
            iteration: 4,
            reason: "invalid argument (-1)".to_string(),
        };
        let text = render(&Err(err), OutputFormat::Text);
        assert!(text.contains("Opus test failed: EncodeError in encode at iteration 4\n"));
        assert!(text.contains("invalid argument (-1)"));
    }

    #[test]
    fn test_text_no_data() {
        let err = BenchError::NoData {
            codec: "LC3".to_string(),
        };
        let text = render(&Err(err), OutputFormat::Text);
        assert!(text.contains("test failed: NoDataError\n"));
        assert!(!text.contains("Avg"));
    }

    #[test]
    fn test_json_success() {
        let line = render(&Ok(result()), OutputFormat::Json);
        let v: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(v["codec"], "Opus");
        assert_eq!(v["ok"], true);
        assert_eq!(v["iterations"], 100);
        assert_eq!(v["encode_mean_us"], 12.34);
        assert!(v.get("error").is_none());
    }

    #[test]
    fn test_json_failure() {
        let err = BenchError::Decode {
            codec: "LC3".to_string(),
            iteration: 9,
            reason: "rc=-1".to_string(),
        };
        let line = render(&Err(err), OutputFormat::Json);
        let v: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(v["ok"], false);
        assert_eq!(v["error"]["kind"], "decode");
        assert_eq!(v["error"]["call"], "decode");
        assert_eq!(v["error"]["iteration"], 9);
        assert!(v.get("iterations").is_none());
    }

    #[test]
    fn test_summary() {
        let mut buf = Vec::new();
        summary(&mut buf, &[], OutputFormat::Text).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "All codec tests passed successfully!\n");

        let mut buf = Vec::new();
        summary(&mut buf, &["LC3".to_string()], OutputFormat::Text).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("LC3"));
    }
}
