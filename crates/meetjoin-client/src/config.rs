//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/meetjoin/config.toml` by default. Every key is optional.
//!
//! ```toml
//! debug = false
//!
//! [events]
//! path = "~/.cache/meetjoin/events.json"
//! hours_ahead = 9
//! max_results = 5
//!
//! [classifier]
//! joinable_within_minutes = 3
//!
//! [output]
//! format = "alfred"
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use meetjoin_core::classify::DEFAULT_JOINABLE_WITHIN_MINUTES;
use meetjoin_core::source::{DEFAULT_HOURS_AHEAD, DEFAULT_MAX_RESULTS};
use meetjoin_core::{EventClassifier, FetchOptions, TimeWindow};

use crate::error::{ClientError, ClientResult};
use crate::render::OutputFormat;

/// Configuration for the meetjoin client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Where raw events come from and how many.
    pub events: EventSettings,

    /// Classification settings.
    pub classifier: ClassifierSettings,

    /// Output settings.
    pub output: OutputSettings,
}

/// Raw event lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Saved `events.list` payload; `-` reads stdin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// How far ahead of now to look.
    pub hours_ahead: i64,

    /// Maximum number of events to consider.
    pub max_results: usize,

    /// Trace every raw event before classification.
    pub dump_raw: bool,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            path: None,
            hours_ahead: DEFAULT_HOURS_AHEAD,
            max_results: DEFAULT_MAX_RESULTS,
            dump_raw: false,
        }
    }
}

/// Classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// A meeting starting within this many minutes is joinable.
    pub joinable_within_minutes: i64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            joinable_within_minutes: DEFAULT_JOINABLE_WITHIN_MINUTES,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format used when `--format` is not given.
    pub format: OutputFormat,
}

impl ClientConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            ClientError::config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("meetjoin")
    }

    /// Rejects values that cannot describe a lookup.
    pub fn validate(&self) -> ClientResult<()> {
        if self.events.hours_ahead <= 0 {
            return Err(ClientError::config("events.hours_ahead must be positive"));
        }
        if self.events.max_results == 0 {
            return Err(ClientError::config("events.max_results must be positive"));
        }
        if self.classifier.joinable_within_minutes <= 0 {
            return Err(ClientError::config(
                "classifier.joinable_within_minutes must be positive",
            ));
        }
        self.lookahead()?;
        self.joinable_within()?;
        Ok(())
    }

    /// The fetch window and limit for a run at `now`.
    pub fn fetch_options(&self, now: DateTime<Utc>) -> ClientResult<FetchOptions> {
        Ok(FetchOptions::new()
            .with_time_window(TimeWindow::from_now(now, self.lookahead()?))
            .with_max_results(self.events.max_results))
    }

    /// The classifier described by this configuration.
    pub fn classifier(&self) -> ClientResult<EventClassifier> {
        Ok(EventClassifier::new().with_joinable_within(self.joinable_within()?))
    }

    fn lookahead(&self) -> ClientResult<Duration> {
        TimeDelta::try_hours(self.events.hours_ahead)
            .ok_or_else(|| ClientError::config("events.hours_ahead out of range"))
    }

    fn joinable_within(&self) -> ClientResult<Duration> {
        TimeDelta::try_minutes(self.classifier.joinable_within_minutes)
            .ok_or_else(|| ClientError::config("classifier.joinable_within_minutes out of range"))
    }
}
