pub mod report;
pub mod runner;

pub use report::{Failure, Report, ReportFormat};
pub use runner::{Measurement, RunError, RunOptions, Stage, run_timed};
