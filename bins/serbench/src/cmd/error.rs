use bench_api::CodecError;

#[derive(Debug, thiserror::Error)]
pub enum SerbenchError {
    #[error("config: {0}")]
    Config(String),

    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("{0} experiment(s) failed")]
    RunsFailed(usize),
}
