// Machine-readable summary of a benchmark session.
//
// Text output is streamed by the runner while experiments execute; this module
// only collects the measurements and renders the final JSON document.

use std::io::Write;

use serde::Deserialize;
use serde_json::{Value, json};

use bench_api::{CodecError, DataFormat};

use crate::runner::{Measurement, RunError, Stage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Experiment lines on stdout.
    #[default]
    Text,
    /// Only the JSON summary, on stdout.
    Json,
    /// Experiment lines on stderr, JSON summary on stdout.
    Both,
}

impl ReportFormat {
    pub fn parse(input: &str) -> Result<Self, CodecError> {
        match input.trim() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "both" => Ok(Self::Both),
            other => Err(CodecError::config(format!(
                "invalid report format '{other}' (use text|json|both)"
            ))),
        }
    }

    pub fn wants_json(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub name: String,
    pub format: DataFormat,
    pub stage: Option<Stage>,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub version: String,
    pub input: String,
    pub records: usize,
    pub verify: bool,
    pub results: Vec<Measurement>,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn new(version: &str, input: &str, records: usize, verify: bool) -> Self {
        Self {
            version: version.to_string(),
            input: input.to_string(),
            records,
            verify,
            results: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Record the outcome of one experiment.
    pub fn push(&mut self, format: DataFormat, outcome: &Result<Measurement, RunError>) {
        match outcome {
            Ok(m) => self.results.push(m.clone()),
            Err(e) => self.failures.push(Failure {
                name: format.label().to_string(),
                format,
                stage: e.stage(),
                error: e.to_string(),
            }),
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn to_json(&self) -> Value {
        let results: Vec<Value> = self
            .results
            .iter()
            .map(|m| {
                json!({
                    "name": m.name,
                    "format": m.format,
                    "total_ns": duration_ns(m.total),
                    "serialize_ns": duration_ns(m.serialize),
                    "deserialize_ns": duration_ns(m.deserialize),
                    "bytes": m.bytes,
                    "verified": m.verified,
                })
            })
            .collect();

        let failures: Vec<Value> = self
            .failures
            .iter()
            .map(|f| {
                json!({
                    "name": f.name,
                    "format": f.format,
                    "stage": f.stage.map(|s| s.to_string()),
                    "error": f.error,
                })
            })
            .collect();

        json!({
            "name": "serbench",
            "version": self.version,
            "input": self.input,
            "records": self.records,
            "verify": self.verify,
            "results": results,
            "failures": failures,
        })
    }

    pub fn emit_json(&self, out: &mut dyn Write) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(&mut *out, &self.to_json())?;
        writeln!(out).map_err(serde_json::Error::io)
    }
}

fn duration_ns(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
