use std::io::Write;

use bench_api::{Codec, DataFormat, Dataset};
use bench_harness::{Report, ReportFormat, RunError, RunOptions, run_timed};

use super::config::RunEffective;
use super::error::SerbenchError;

// ═══════════════════════════════════════════════════════════════
//  Main dispatch
// ═══════════════════════════════════════════════════════════════

pub fn run(args: &RunEffective) -> Result<(), SerbenchError> {
    let dataset = Dataset::load(&args.input)?;
    tracing::info!(
        input = %args.input,
        records = dataset.len(),
        map_entries = dataset.map_entries(),
        "dataset loaded"
    );

    let mut report = Report::new(env!("CARGO_PKG_VERSION"), &args.input, dataset.len(), args.verify);
    let options = RunOptions { verify: args.verify };

    {
        let mut out: Box<dyn Write> = match args.report {
            ReportFormat::Text => Box::new(std::io::stdout().lock()),
            ReportFormat::Json => Box::new(std::io::sink()),
            ReportFormat::Both => Box::new(std::io::stderr().lock()),
        };

        for &format in &args.formats {
            let mut codec = create_codec(format, &dataset);
            let outcome = match run_timed(format.label(), codec.as_mut(), &dataset, options, &mut *out) {
                Err(RunError::Output(e)) => return Err(e.into()),
                other => other,
            };
            match &outcome {
                Ok(m) => tracing::debug!(format = %format, bytes = m.bytes, "experiment finished"),
                Err(e) => tracing::warn!(format = %format, error = %e, "experiment failed"),
            }
            report.push(format, &outcome);
        }
        out.flush()?;
    }

    if args.report.wants_json() {
        report.emit_json(&mut std::io::stdout().lock())?;
    }

    if report.has_failures() {
        return Err(SerbenchError::RunsFailed(report.failures.len()));
    }
    Ok(())
}

/// Build the adapter for `format`, including its one-time setup.
pub fn create_codec(format: DataFormat, dataset: &Dataset) -> Box<dyn Codec> {
    match format {
        DataFormat::Native => codec_native::create_codec(),
        DataFormat::Json => codec_json::create_codec(),
        DataFormat::Yaml => codec_yaml::create_codec(),
        DataFormat::Msgpack => codec_msgpack::create_codec(),
        DataFormat::Protobuf => codec_protobuf::create_codec(dataset),
    }
}
