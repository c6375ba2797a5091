//! Raw event suppliers.
//!
//! An [`EventSource`] hands the engine the raw events of a bounded forward
//! window. Fetching from a live calendar is left to the caller; the sources
//! here read a saved `events.list` payload or wrap an in-memory list.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::raw_event::{EventPayload, RawEvent};
use crate::time::{TimeWindow, parse_event_time};

/// How far ahead events are looked up by default.
pub const DEFAULT_HOURS_AHEAD: i64 = 9;

/// How many events are considered by default.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Path value meaning "read from standard input".
pub const STDIN_PATH: &str = "-";

/// Options for fetching events.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Time window to fetch events for.
    pub time_window: Option<TimeWindow>,
    /// Maximum number of events to return.
    pub max_results: Option<usize>,
}

impl FetchOptions {
    /// Creates new fetch options with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default lookup: the next nine hours, at most five events.
    pub fn for_now(now: DateTime<Utc>) -> Self {
        Self::new()
            .with_time_window(TimeWindow::from_now(
                now,
                Duration::hours(DEFAULT_HOURS_AHEAD),
            ))
            .with_max_results(DEFAULT_MAX_RESULTS)
    }

    /// Builder method to set time window.
    pub fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    /// Builder method to set max results.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Applies the window and the result limit to a list of events.
    ///
    /// Events with unparseable times are kept; the classifier degrades them.
    pub fn apply(&self, events: Vec<RawEvent>) -> Vec<RawEvent> {
        let mut events: Vec<RawEvent> = match self.time_window {
            Some(window) => events
                .into_iter()
                .filter(|event| {
                    let start = parse_event_time(&event.start).ok();
                    let end = parse_event_time(&event.end).ok();
                    window.admits(start.as_ref(), end.as_ref())
                })
                .collect(),
            None => events,
        };
        if let Some(max) = self.max_results {
            events.truncate(max);
        }
        events
    }
}

/// A supplier of raw calendar events.
pub trait EventSource {
    /// A short name for diagnostics.
    fn name(&self) -> &str;

    /// Returns the raw events matching `options`, in start order.
    fn fetch_events(&self, options: &FetchOptions) -> SourceResult<Vec<RawEvent>>;
}

/// Reads a saved `events.list` payload from a file, or from stdin for `-`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a source reading from standard input.
    pub fn stdin() -> Self {
        Self::new(STDIN_PATH)
    }

    /// The path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN_PATH
    }

    fn read_payload(&self) -> SourceResult<String> {
        if self.is_stdin() {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| SourceError::io(&self.path, e))?;
            Ok(buf)
        } else {
            std::fs::read_to_string(&self.path).map_err(|e| SourceError::io(&self.path, e))
        }
    }
}

impl EventSource for JsonFileSource {
    fn name(&self) -> &str {
        if self.is_stdin() { "stdin" } else { "json-file" }
    }

    fn fetch_events(&self, options: &FetchOptions) -> SourceResult<Vec<RawEvent>> {
        let content = self.read_payload()?;
        let payload: EventPayload = serde_json::from_str(&content)?;
        let events = payload.into_events();
        let total = events.len();
        let events = options.apply(events);
        debug!(
            path = %self.path.display(),
            total,
            kept = events.len(),
            "loaded events"
        );
        Ok(events)
    }
}

/// Serves a fixed list of events.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    events: Vec<RawEvent>,
}

impl StaticSource {
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self { events }
    }
}

impl EventSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_events(&self, options: &FetchOptions) -> SourceResult<Vec<RawEvent>> {
        Ok(options.apply(self.events.clone()))
    }
}
