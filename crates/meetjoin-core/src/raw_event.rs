//! Raw event type as returned by the calendar API.
//!
//! [`RawEvent`] mirrors one item of a Google Calendar `events.list`
//! response. Every field is optional with a default so that any JSON object
//! deserializes; validating the shape is left to the classifier, which
//! degrades missing or malformed pieces instead of failing.

use serde::{Deserialize, Serialize};

/// The `start` or `end` record of a raw event.
///
/// Timed events carry `dateTime`, all-day events carry `date`. The values
/// are kept as strings: parsing happens in [`crate::time::parse_event_time`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    /// Date-only value (`YYYY-MM-DD`) for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// RFC 3339 timestamp for timed events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// IANA timezone the event was created in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl RawEventTime {
    /// Creates a timed record.
    pub fn from_date_time(value: impl Into<String>) -> Self {
        Self {
            date_time: Some(value.into()),
            ..Self::default()
        }
    }

    /// Creates an all-day record.
    pub fn from_date(value: impl Into<String>) -> Self {
        Self {
            date: Some(value.into()),
            ..Self::default()
        }
    }

    /// Returns true if this record carries a date-only value.
    ///
    /// This is structural: it says nothing about whether the value parses.
    pub fn is_date_only(&self) -> bool {
        self.date.is_some()
    }
}

/// An entry point for joining a conference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntryPoint {
    /// The type of entry point (e.g., "video", "phone", "more").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point_type: Option<String>,
    /// The URI for this entry point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// A label for this entry point (e.g., phone number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RawEntryPoint {
    /// Creates a video entry point for the given URI.
    pub fn video(uri: impl Into<String>) -> Self {
        Self {
            entry_point_type: Some("video".to_string()),
            uri: Some(uri.into()),
            label: None,
        }
    }
}

/// Conference data attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConferenceData {
    /// Entry points for joining the conference.
    ///
    /// `None` when the field is absent, which is reported differently from
    /// an empty list in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_points: Option<Vec<RawEntryPoint>>,
}

impl RawConferenceData {
    /// Creates conference data with the given entry points.
    pub fn with_entry_points(entry_points: Vec<RawEntryPoint>) -> Self {
        Self {
            entry_points: Some(entry_points),
        }
    }
}

/// A raw calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Provider event identifier.
    #[serde(default)]
    pub id: String,

    /// The event title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// When the event starts.
    #[serde(default)]
    pub start: RawEventTime,

    /// When the event ends.
    #[serde(default)]
    pub end: RawEventTime,

    /// Free-text location, sometimes a comma-separated list of rooms and URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Free-text description, often HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Conference data (video meeting info).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_data: Option<RawConferenceData>,

    /// Link to the event in the calendar web UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,

    /// Event status ("confirmed", "tentative", "cancelled").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RawEvent {
    /// Creates a raw event with the given id and times.
    pub fn new(id: impl Into<String>, start: RawEventTime, end: RawEventTime) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            ..Self::default()
        }
    }

    /// Returns the summary, or an empty string when absent.
    pub fn summary_or_default(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    /// Returns true if this is an all-day event.
    pub fn is_all_day(&self) -> bool {
        self.start.is_date_only()
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set conference data.
    pub fn with_conference_data(mut self, conference_data: RawConferenceData) -> Self {
        self.conference_data = Some(conference_data);
        self
    }
}

/// Response body of the `events.list` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListResponse {
    /// The listed events, in start-time order.
    #[serde(default)]
    pub items: Vec<RawEvent>,
}

/// A saved events payload: either a full `events.list` response or a bare
/// array of events.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    /// `{"items": [...]}`
    List(EventListResponse),
    /// `[...]`
    Items(Vec<RawEvent>),
}

impl EventPayload {
    /// Returns the events contained in the payload.
    pub fn into_events(self) -> Vec<RawEvent> {
        match self {
            Self::List(list) => list.items,
            Self::Items(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLE_EVENT: &str = r#"{
        "kind": "calendar#event",
        "id": "77gcalEventId_20210712T133000Z",
        "status": "confirmed",
        "htmlLink": "https://www.google.com/calendar/event?eid=abc",
        "summary": "JIRA Board Review",
        "location": "https://example.zoom.us/j/12345678987?pwd=SUPERSECRET1234",
        "start": {"dateTime": "2021-07-12T09:30:00-04:00", "timeZone": "America/New_York"},
        "end": {"dateTime": "2021-07-12T10:00:00-04:00", "timeZone": "America/New_York"},
        "conferenceData": {
            "entryPoints": [
                {"entryPointType": "video", "uri": "https://example.zoom.us/j/12345678987?pwd=SUPERSECRET1234", "label": "example.zoom.us/j/12345678987"},
                {"entryPointType": "phone", "uri": "tel:+16465588656,,12345678987#"}
            ],
            "conferenceSolution": {"name": "Zoom Meeting"}
        }
    }"#;

    #[test]
    fn deserializes_google_event() {
        let event: RawEvent = serde_json::from_str(GOOGLE_EVENT).unwrap();
        assert_eq!(event.id, "77gcalEventId_20210712T133000Z");
        assert_eq!(event.summary_or_default(), "JIRA Board Review");
        assert_eq!(
            event.start.date_time.as_deref(),
            Some("2021-07-12T09:30:00-04:00")
        );
        assert_eq!(event.start.time_zone.as_deref(), Some("America/New_York"));
        assert!(!event.is_all_day());

        let entry_points = event.conference_data.unwrap().entry_points.unwrap();
        assert_eq!(entry_points.len(), 2);
        assert_eq!(entry_points[1].entry_point_type.as_deref(), Some("phone"));
    }

    #[test]
    fn deserializes_sparse_event() {
        let event: RawEvent = serde_json::from_str(r#"{"start": {"date": "2021-07-12"}}"#).unwrap();
        assert!(event.id.is_empty());
        assert_eq!(event.summary_or_default(), "");
        assert!(event.is_all_day());
        assert_eq!(event.end, RawEventTime::default());
        assert!(event.conference_data.is_none());
    }

    #[test]
    fn distinguishes_absent_and_empty_entry_points() {
        let absent: RawEvent = serde_json::from_str(r#"{"conferenceData": {}}"#).unwrap();
        assert_eq!(absent.conference_data.unwrap().entry_points, None);

        let empty: RawEvent =
            serde_json::from_str(r#"{"conferenceData": {"entryPoints": []}}"#).unwrap();
        assert_eq!(empty.conference_data.unwrap().entry_points, Some(vec![]));
    }

    #[test]
    fn payload_accepts_list_response_and_bare_array() {
        let list: EventPayload =
            serde_json::from_str(r#"{"kind": "calendar#events", "items": [{"id": "a"}, {"id": "b"}]}"#)
                .unwrap();
        let ids: Vec<_> = list.into_events().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let bare: EventPayload = serde_json::from_str(r#"[{"id": "c"}]"#).unwrap();
        assert_eq!(bare.into_events()[0].id, "c");

        let empty: EventPayload = serde_json::from_str(r#"{"kind": "calendar#events"}"#).unwrap();
        assert!(empty.into_events().is_empty());
    }

    #[test]
    fn builder() {
        let event = RawEvent::new(
            "evt-1",
            RawEventTime::from_date_time("2021-07-12T09:30:00Z"),
            RawEventTime::from_date_time("2021-07-12T10:00:00Z"),
        )
        .with_summary("Standup")
        .with_location("Room 1")
        .with_description("<b>agenda</b>")
        .with_conference_data(RawConferenceData::with_entry_points(vec![
            RawEntryPoint::video("https://meet.google.com/abc-defg-hij"),
        ]));

        assert_eq!(event.summary.as_deref(), Some("Standup"));
        assert_eq!(event.location.as_deref(), Some("Room 1"));
        assert_eq!(event.description.as_deref(), Some("<b>agenda</b>"));
        assert_eq!(
            event.conference_data.unwrap().entry_points.unwrap()[0]
                .uri
                .as_deref(),
            Some("https://meet.google.com/abc-defg-hij")
        );
    }
}
