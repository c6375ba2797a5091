//! Error types for the core engine.
//!
//! Classification and join resolution never fail: these errors only show up
//! at the parse boundaries (timestamps, URLs) where the caller decides how to
//! degrade, and at the raw-event source boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a raw `start`/`end` record into an [`EventTime`].
///
/// [`EventTime`]: crate::time::EventTime
#[derive(Debug, Error)]
pub enum TimeParseError {
    /// Neither `dateTime` nor `date` was present.
    #[error("event time has neither a dateTime nor a date value")]
    MissingValue,

    /// The `dateTime` value is not an ISO 8601 timestamp.
    #[error("invalid dateTime {value:?}: {source}")]
    InvalidDateTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The `date` value is not a `YYYY-MM-DD` date.
    #[error("invalid date {value:?}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Failure to rewrite a meeting link into its native-protocol form.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The link could not be parsed as a URL.
    #[error("invalid meeting URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed but carries no host to hand over to the native client.
    #[error("meeting URL {url:?} has no host")]
    MissingHost { url: String },
}

/// Result type for raw-event source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised by a raw-event supplier.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading the payload failed.
    #[error("failed to read events from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not an events list.
    #[error("failed to parse events payload: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SourceError {
    /// Creates an IO error tied to the path being read.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
