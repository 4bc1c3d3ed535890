use thiserror::Error;

/// Error type for the fallible edges of the crate: configuration, the JSON
/// store, and command dispatch. Decision logic itself never fails.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Not loaded: {0}")]
    NotLoaded(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Usage(String),
}
