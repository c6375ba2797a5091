//! Command implementations.
//!
//! `list` and `join` share one pipeline: fetch raw events, classify them,
//! keep the join candidates, then resolve the meeting to join.

pub mod config;
pub mod join;
pub mod list;

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use meetjoin_core::{EventClassifier, EventSource, FetchOptions, JsonFileSource, NormalizedEvent};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Settings for one run of the pipeline.
#[derive(Debug, Clone)]
pub struct Session {
    /// The reference instant.
    pub now: DateTime<Utc>,
    pub options: FetchOptions,
    pub classifier: EventClassifier,
    /// Trace every raw event before classification.
    pub dump_raw: bool,
}

impl Session {
    /// Builds a session from the configuration.
    pub fn new(config: &ClientConfig, now: DateTime<Utc>) -> ClientResult<Self> {
        Ok(Self {
            now,
            options: config.fetch_options(now)?,
            classifier: config.classifier()?,
            dump_raw: config.events.dump_raw,
        })
    }

    /// Fetches and classifies events, preserving the source order.
    pub fn classify(&self, source: &dyn EventSource) -> ClientResult<Vec<NormalizedEvent>> {
        let raws = source.fetch_events(&self.options)?;
        debug!(source = source.name(), count = raws.len(), now = %self.now, "fetched events");
        if self.dump_raw {
            for raw in &raws {
                trace!(event = ?raw, "raw event");
            }
        }
        Ok(self.classifier.classify_all(&raws, self.now))
    }
}

/// Picks the events source: `--events` wins over `events.path`.
pub fn open_source(events: Option<&Path>, config: &ClientConfig) -> ClientResult<JsonFileSource> {
    events
        .or(config.events.path.as_deref())
        .map(JsonFileSource::new)
        .ok_or_else(|| {
            ClientError::config("no events source: pass --events or set events.path")
        })
}
