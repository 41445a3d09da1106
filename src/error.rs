use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("invalid tle format: expected 2 or 3 lines, got {0}")]
    InvalidTleFormat(usize),
    #[error("invalid tle: {0}")]
    InvalidTle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("propagation error: {0}")]
    Propagation(String),
}

impl From<sgp4::Error> for PropagationError {
    fn from(err: sgp4::Error) -> Self {
        PropagationError::Propagation(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("test case read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("test case parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid timestamp {value:?}: {message}")]
    InvalidTimestamp { value: String, message: String },
    #[error("invalid time window: {0}")]
    InvalidTimeWindow(String),
    #[error("satellite: {0}")]
    Satellite(#[from] PropagationError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{file}: {source}")]
    Case {
        file: String,
        #[source]
        source: CaseError,
    },
    #[error("result JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}
