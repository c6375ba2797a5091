//! Event types produced by the engine.
//!
//! This module provides:
//! - [`NormalizedEvent`]: the classified form of one raw calendar event
//! - [`ResolvedLink`]: a meeting link with the provider and source it came from
//! - [`LinkKind`] and [`LinkSource`]: what kind of link, and where it was found

use serde::{Deserialize, Serialize};

use crate::icon::Icon;
use crate::time::EventTime;

/// The video conferencing service behind a meeting link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Zoom,
    GoogleMeet,
}

/// The part of a raw event a meeting link was taken from.
///
/// Variants are listed in search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkSource {
    Location,
    ConferenceData,
    Description,
}

/// A meeting link found in a raw event, ready to launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    /// The detected service.
    pub kind: LinkKind,
    /// Where the link was found.
    pub source: LinkSource,
    /// The launchable URI (native protocol for Zoom).
    pub url: String,
}

/// A calendar event after classification.
///
/// Built once per raw event by the classifier and never mutated afterwards.
/// `in_progress` and `is_next_joinable` are never both true, and both are
/// false for all-day events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    /// Provider event id, carried through unchanged.
    pub id: String,
    /// Parsed start, `None` when absent or unparseable.
    pub start: Option<EventTime>,
    /// The event title.
    pub summary: String,
    /// False for all-day events.
    pub is_timed: bool,
    /// The reference instant lies within `[start, end]`.
    pub in_progress: bool,
    /// The event starts shortly after the reference instant.
    pub is_next_joinable: bool,
    /// Launchable meeting URI, if one was found.
    pub meeting_link: Option<String>,
    /// Presentation icon derived from the title.
    pub icon: Icon,
}

impl NormalizedEvent {
    /// Returns true if this event can be offered as a meeting to join:
    /// it is timed and has a meeting link.
    pub fn is_join_candidate(&self) -> bool {
        self.is_timed && self.meeting_link.is_some()
    }
}
