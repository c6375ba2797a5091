//! Client error types.

use thiserror::Error;

use meetjoin_core::{Decision, SourceError, TracingError};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The raw event supplier failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// `--now` is not an ISO 8601 timestamp.
    #[error(
        "given datetime ({value}) not valid! Expected ISO format, 'YYYY-MM-DDTHH:mm:ss.mmmmmmZ'"
    )]
    InvalidNow { value: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config serialization failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// `join` found no single meeting to join.
    #[error("no single meeting to join ({0})")]
    NoMeetingToJoin(Decision),

    #[error(transparent)]
    Tracing(#[from] TracingError),
}

impl ClientError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
