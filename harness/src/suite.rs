//! Sequential benchmark of every selected codec over one signal source.

use std::io::{self, Write};

use codecbench_audio::pcm::SignalSource;
use tracing::{info, warn};

use crate::adapter::CodecKind;
use crate::config::CodecConfig;
use crate::error::BenchError;
use crate::report::{self, OutputFormat};
use crate::runner::{BenchmarkResult, Runner};

/// Outcome of one codec's run.
#[derive(Debug)]
pub struct Outcome {
    pub kind: CodecKind,
    pub result: Result<BenchmarkResult, BenchError>,
}

/// Outcomes of a whole suite.
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<Outcome>,
}

impl SuiteReport {
    /// Returns the names of codecs whose run failed.
    pub fn failed(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.kind.name().to_string())
            .collect()
    }

    /// Returns true if every codec run finalized.
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Runs codecs one after another against the same input.
pub struct Suite {
    runner: Runner,
    config: CodecConfig,
    codecs: Vec<CodecKind>,
}

impl Suite {
    pub fn new(runner: Runner, config: CodecConfig, codecs: Vec<CodecKind>) -> Self {
        Self {
            runner,
            config,
            codecs,
        }
    }

    /// Benchmarks each codec, rewinding `source` before every run, and writes
    /// each outcome to `out` as soon as it is known.
    ///
    /// A failed codec does not stop the others. Only a failure to rewind the
    /// source or to write the report is returned as an error.
    pub fn run(
        &self,
        source: &mut dyn SignalSource,
        out: &mut dyn Write,
        format: OutputFormat,
    ) -> io::Result<SuiteReport> {
        let mut suite = SuiteReport::default();

        for &kind in &self.codecs {
            source.rewind()?;
            let codec = kind.codec();
            info!(codec = codec.name(), "benchmarking");

            let result = self.runner.run(codec.as_ref(), &self.config, source);
            if let Err(e) = &result {
                warn!(codec = codec.name(), kind = %e.kind(), "{}", e);
            }

            report::present(out, codec.name(), &result, format)?;
            suite.outcomes.push(Outcome { kind, result });
        }

        report::summary(out, &suite.failed(), format)?;
        Ok(suite)
    }
}
