use std::io::Write;
use std::time::{Duration, Instant};

use bench_api::{Codec, CodecError, DataFormat, Dataset};

pub const SEPARATOR: &str = "--------------------------------------------------";

// ════════════════════════════════════════════════════════════════
//  Types
// ════════════════════════════════════════════════════════════════

/// Шаг прогона, на котором произошла ошибка.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Serialize,
    Deserialize,
    Verify,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Serialize => f.write_str("serialize"),
            Stage::Deserialize => f.write_str("deserialize"),
            Stage::Verify => f.write_str("verify"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{name} {stage}: {source}")]
    Codec {
        name: String,
        stage: Stage,
        source: CodecError,
    },

    #[error("report output: {0}")]
    Output(#[from] std::io::Error),
}

impl RunError {
    fn codec(name: &str, stage: Stage, source: CodecError) -> Self {
        RunError::Codec { name: name.to_string(), stage, source }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            RunError::Codec { stage, .. } => Some(*stage),
            RunError::Output(_) => None,
        }
    }
}

/// Результат одного прогона.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub format: DataFormat,
    pub total: Duration,
    pub serialize: Duration,
    pub deserialize: Duration,
    pub bytes: usize,
    /// `None` — проверка round-trip не запускалась.
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Untimed round-trip check after the measured calls.
    pub verify: bool,
}

// ════════════════════════════════════════════════════════════════
//  run_timed
// ════════════════════════════════════════════════════════════════

/// Run one experiment: time `serialize`, then `deserialize` on the bytes it produced.
///
/// Progress lines go to `out`. A codec failure is returned after the start
/// marker is written; no metric lines are written for a failed run.
pub fn run_timed(
    name: &str,
    codec: &mut dyn Codec,
    dataset: &Dataset,
    options: RunOptions,
    out: &mut dyn Write,
) -> Result<Measurement, RunError> {
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "Starting {name} serialization experiment")?;
    tracing::debug!(experiment = name, format = %codec.format(), records = dataset.len(), "experiment started");

    let start = Instant::now();

    let start_ser = Instant::now();
    let bytes = codec
        .serialize(dataset)
        .map_err(|e| RunError::codec(name, Stage::Serialize, e))?;
    let elapsed_ser = start_ser.elapsed();

    let start_deser = Instant::now();
    codec
        .deserialize(&bytes)
        .map_err(|e| RunError::codec(name, Stage::Deserialize, e))?;
    let elapsed_deser = start_deser.elapsed();

    let elapsed = start.elapsed();

    let verified = if options.verify {
        verify(name, codec, dataset, &bytes)?;
        Some(true)
    } else {
        None
    };

    writeln!(out, "Experiment took {elapsed:?}")?;
    writeln!(out, "Serialization took {elapsed_ser:?}")?;
    writeln!(out, "Deserialization took {elapsed_deser:?}")?;
    writeln!(out, "Total Bytes: {}", bytes.len())?;

    Ok(Measurement {
        name: name.to_string(),
        format: codec.format(),
        total: elapsed,
        serialize: elapsed_ser,
        deserialize: elapsed_deser,
        bytes: bytes.len(),
        verified,
    })
}

fn verify(name: &str, codec: &mut dyn Codec, dataset: &Dataset, bytes: &[u8]) -> Result<(), RunError> {
    let decoded = codec
        .decode(bytes)
        .map_err(|e| RunError::codec(name, Stage::Verify, e))?;
    let expected = codec.expected(dataset);
    if decoded != expected {
        let first_diff = decoded
            .tests
            .iter()
            .zip(&expected.tests)
            .position(|(got, want)| got != want)
            .unwrap_or(decoded.len().min(expected.len()));
        return Err(RunError::codec(
            name,
            Stage::Verify,
            CodecError::logic(format!(
                "round-trip mismatch: decoded {} records, expected {}, first difference at record {first_diff}",
                decoded.len(),
                expected.len()
            )),
        ));
    }
    tracing::debug!(experiment = name, "round-trip verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use bench_api::{ErrorKind, Record};

    fn sample() -> Dataset {
        let maps: BTreeMap<String, i64> = [("x".to_string(), 1)].into();
        Dataset::new(vec![Record { id: 1, frac: 0.5, name: "a".into(), maps }])
    }

    /// Fixed-output codec used to observe the runner.
    struct Scripted {
        output: Vec<u8>,
        fail_serialize: bool,
        fail_deserialize: bool,
        decoded: Dataset,
    }

    impl Scripted {
        fn ok(output: &[u8], decoded: Dataset) -> Self {
            Self { output: output.to_vec(), fail_serialize: false, fail_deserialize: false, decoded }
        }
    }

    impl Codec for Scripted {
        fn format(&self) -> DataFormat {
            DataFormat::Json
        }

        fn serialize(&mut self, _dataset: &Dataset) -> Result<Vec<u8>, CodecError> {
            if self.fail_serialize {
                return Err(CodecError::format("cannot encode"));
            }
            Ok(self.output.clone())
        }

        fn deserialize(&mut self, data: &[u8]) -> Result<(), CodecError> {
            assert_eq!(data, self.output.as_slice());
            if self.fail_deserialize {
                return Err(CodecError::format("cannot decode"));
            }
            Ok(())
        }

        fn decode(&mut self, _data: &[u8]) -> Result<Dataset, CodecError> {
            Ok(self.decoded.clone())
        }
    }

    #[test]
    fn reports_bytes_and_lines() {
        let mut codec = Scripted::ok(b"12345", sample());
        let mut out = Vec::new();
        let m = run_timed("JSON", &mut codec, &sample(), RunOptions::default(), &mut out).unwrap();

        assert_eq!(m.bytes, 5);
        assert_eq!(m.name, "JSON");
        assert_eq!(m.format, DataFormat::Json);
        assert_eq!(m.verified, None);
        assert!(m.total >= m.serialize);
        assert!(m.total >= m.deserialize);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], SEPARATOR);
        assert_eq!(lines[1], "Starting JSON serialization experiment");
        assert!(lines[2].starts_with("Experiment took "));
        assert!(lines[3].starts_with("Serialization took "));
        assert!(lines[4].starts_with("Deserialization took "));
        assert_eq!(lines[5], "Total Bytes: 5");
    }

    #[test]
    fn serialize_failure_stops_before_metrics() {
        let mut codec = Scripted { fail_serialize: true, ..Scripted::ok(b"", sample()) };
        let mut out = Vec::new();
        let err = run_timed("JSON", &mut codec, &sample(), RunOptions::default(), &mut out).unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Serialize));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Starting JSON serialization experiment"));
        assert!(!text.contains("Total Bytes"));
    }

    #[test]
    fn deserialize_failure_has_stage() {
        let mut codec = Scripted { fail_deserialize: true, ..Scripted::ok(b"abc", sample()) };
        let err = run_timed("X", &mut codec, &sample(), RunOptions::default(), &mut std::io::sink())
            .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Deserialize));
        assert_eq!(err.to_string(), "X deserialize: [format] cannot decode");
    }

    #[test]
    fn verify_accepts_faithful_round_trip() {
        let mut codec = Scripted::ok(b"abc", sample());
        let m = run_timed("X", &mut codec, &sample(), RunOptions { verify: true }, &mut std::io::sink())
            .unwrap();
        assert_eq!(m.verified, Some(true));
    }

    #[test]
    fn verify_reports_mismatch_as_logic_error() {
        let mut other = sample();
        other.tests[0].name = "b".into();
        let mut codec = Scripted::ok(b"abc", other);
        let err = run_timed("X", &mut codec, &sample(), RunOptions { verify: true }, &mut std::io::sink())
            .unwrap_err();
        match err {
            RunError::Codec { stage, source, .. } => {
                assert_eq!(stage, Stage::Verify);
                assert_eq!(source.kind(), ErrorKind::Logic);
                assert!(source.message().contains("first difference at record 0"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
