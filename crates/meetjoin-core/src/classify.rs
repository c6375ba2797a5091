//! Raw event to [`NormalizedEvent`] classification.
//!
//! Classification is total: a malformed timestamp becomes `None` and the
//! flags depending on it fall back to `false`. Every call takes the reference
//! instant explicitly.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::event::NormalizedEvent;
use crate::icon::Icon;
use crate::links::MeetingLinkResolver;
use crate::raw_event::{RawEvent, RawEventTime};
use crate::time::{EventTime, parse_event_time};

/// Minutes before its start at which an upcoming meeting becomes joinable.
pub const DEFAULT_JOINABLE_WITHIN_MINUTES: i64 = 3;

/// Turns raw events into normalized events relative to a reference instant.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    joinable_within: Duration,
    resolver: MeetingLinkResolver,
}

impl Default for EventClassifier {
    fn default() -> Self {
        Self {
            joinable_within: Duration::minutes(DEFAULT_JOINABLE_WITHIN_MINUTES),
            resolver: MeetingLinkResolver::new(),
        }
    }
}

impl EventClassifier {
    /// Creates a classifier with the default three minute threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the joinable-soon threshold.
    #[must_use]
    pub fn with_joinable_within(mut self, threshold: Duration) -> Self {
        self.joinable_within = threshold;
        self
    }

    /// The joinable-soon threshold in use.
    pub fn joinable_within(&self) -> Duration {
        self.joinable_within
    }

    /// Classifies one raw event.
    pub fn classify(&self, raw: &RawEvent, now: DateTime<Utc>) -> NormalizedEvent {
        let summary = raw.summary_or_default();
        let is_timed = !raw.is_all_day();
        let start = parse_or_none(&raw.start, &raw.id, "start");
        let end = parse_or_none(&raw.end, &raw.id, "end");

        let start_utc = start.as_ref().map(EventTime::to_utc_datetime);
        let end_utc = end.as_ref().map(EventTime::to_utc_datetime);

        let in_progress = is_timed
            && match (start_utc, end_utc) {
                (Some(s), Some(e)) => s <= now && now <= e,
                _ => false,
            };
        let is_next_joinable = is_timed
            && !in_progress
            && start_utc.is_some_and(|s| s > now && s - now < self.joinable_within);

        let event = NormalizedEvent {
            id: raw.id.clone(),
            start,
            summary: summary.to_string(),
            is_timed,
            in_progress,
            is_next_joinable,
            meeting_link: self.resolver.resolve(raw),
            icon: Icon::for_title(summary),
        };

        debug!(
            id = %event.id,
            summary = %event.summary,
            start = ?event.start.map(|s| s.to_iso_string()),
            is_timed,
            in_progress,
            is_next_joinable,
            meeting_link = ?event.meeting_link,
            "classified event"
        );

        event
    }

    /// Classifies a sequence of raw events, preserving order.
    pub fn classify_all(&self, raws: &[RawEvent], now: DateTime<Utc>) -> Vec<NormalizedEvent> {
        raws.iter().map(|raw| self.classify(raw, now)).collect()
    }
}

fn parse_or_none(raw: &RawEventTime, id: &str, field: &'static str) -> Option<EventTime> {
    match parse_event_time(raw) {
        Ok(time) => Some(time),
        Err(err) => {
            trace!(id, field, error = %err, "event time unavailable");
            None
        }
    }
}

/// Classifies one raw event with the default classifier.
pub fn classify_event(raw: &RawEvent, now: DateTime<Utc>) -> NormalizedEvent {
    EventClassifier::default().classify(raw, now)
}

/// Classifies raw events with the default classifier, preserving order.
pub fn classify_events(raws: &[RawEvent], now: DateTime<Utc>) -> Vec<NormalizedEvent> {
    EventClassifier::default().classify_all(raws, now)
}

/// Keeps the events that can be offered for joining: timed, with a link.
pub fn join_candidates(events: &[NormalizedEvent]) -> Vec<&NormalizedEvent> {
    events.iter().filter(|e| e.is_join_candidate()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_event::{RawConferenceData, RawEntryPoint};

    const ZOOM: &str = "https://example.zoom.us/j/12345678987?pwd=SUPERSECRET1234";
    const ZOOM_NATIVE: &str =
        "zoommtg://example.zoom.us/join?action=join&confno=12345678987&pwd=SUPERSECRET1234";

    fn now(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn board_review() -> RawEvent {
        RawEvent::new(
            "77gcalEventId_20210712T133000Z",
            RawEventTime::from_date_time("2021-07-12T09:30:00-04:00"),
            RawEventTime::from_date_time("2021-07-12T10:00:00-04:00"),
        )
        .with_summary("JIRA Board Review")
        .with_conference_data(RawConferenceData::with_entry_points(vec![
            RawEntryPoint::video(ZOOM),
        ]))
    }

    fn timed(start: &str, end: &str) -> RawEvent {
        RawEvent::new(
            "evt",
            RawEventTime::from_date_time(start),
            RawEventTime::from_date_time(end),
        )
    }

    mod flags {
        use super::*;

        #[test]
        fn in_progress_meeting() {
            let event = classify_event(&board_review(), now("2021-07-12T09:37:00-04:00"));
            assert_eq!(event.id, "77gcalEventId_20210712T133000Z");
            assert_eq!(event.summary, "JIRA Board Review");
            assert!(event.is_timed);
            assert!(event.in_progress);
            assert!(!event.is_next_joinable);
            assert_eq!(event.meeting_link.as_deref(), Some(ZOOM_NATIVE));
            assert_eq!(event.icon, Icon::Default);
            assert_eq!(
                event.start.unwrap().to_iso_string(),
                "2021-07-12T09:30:00-04:00"
            );
        }

        #[test]
        fn joinable_soon_meeting() {
            let event = classify_event(&board_review(), now("2021-07-12T09:28:00-04:00"));
            assert!(!event.in_progress);
            assert!(event.is_next_joinable);
        }

        #[test]
        fn bounds_are_inclusive_for_in_progress() {
            let event = classify_event(&board_review(), now("2021-07-12T09:30:00-04:00"));
            assert!(event.in_progress);
            assert!(!event.is_next_joinable);

            let event = classify_event(&board_review(), now("2021-07-12T10:00:00-04:00"));
            assert!(event.in_progress);

            let event = classify_event(&board_review(), now("2021-07-12T10:00:01-04:00"));
            assert!(!event.in_progress);
            assert!(!event.is_next_joinable);
        }

        #[test]
        fn joinable_threshold_is_exclusive() {
            let exactly = classify_event(&board_review(), now("2021-07-12T09:27:00-04:00"));
            assert!(!exactly.is_next_joinable);

            let just_inside = classify_event(&board_review(), now("2021-07-12T09:27:01-04:00"));
            assert!(just_inside.is_next_joinable);

            let far = classify_event(&board_review(), now("2021-07-12T08:00:00-04:00"));
            assert!(!far.is_next_joinable);
            assert!(!far.in_progress);
        }

        #[test]
        fn custom_threshold() {
            let classifier = EventClassifier::new().with_joinable_within(Duration::minutes(10));
            assert_eq!(classifier.joinable_within(), Duration::minutes(10));
            let event = classifier.classify(&board_review(), now("2021-07-12T09:22:00-04:00"));
            assert!(event.is_next_joinable);
        }

        #[test]
        fn flags_are_exclusive() {
            let raw = board_review();
            for minute in 20..70 {
                let at = now("2021-07-12T09:00:00-04:00") + Duration::minutes(minute);
                let event = classify_event(&raw, at);
                assert!(!(event.in_progress && event.is_next_joinable));
            }
        }
    }

    mod degradation {
        use super::*;

        #[test]
        fn all_day_event_is_never_active() {
            let raw = RawEvent::new(
                "day",
                RawEventTime::from_date("2021-07-12"),
                RawEventTime::from_date("2021-07-13"),
            )
            .with_summary("Offsite")
            .with_location(ZOOM);

            for at in ["2021-07-11T23:59:00Z", "2021-07-12T00:00:00Z", "2021-07-12T12:00:00Z"] {
                let event = classify_event(&raw, now(at));
                assert!(!event.is_timed);
                assert!(!event.in_progress);
                assert!(!event.is_next_joinable);
            }
            let event = classify_event(&raw, now("2021-07-12T12:00:00Z"));
            assert!(event.start.unwrap().is_all_day());
            assert!(!event.is_join_candidate());
        }

        #[test]
        fn malformed_start_is_timed_without_start() {
            let raw = timed("not a time", "2021-07-12T10:00:00Z");
            let event = classify_event(&raw, now("2021-07-12T09:59:00Z"));
            assert!(event.is_timed);
            assert!(event.start.is_none());
            assert!(!event.in_progress);
            assert!(!event.is_next_joinable);
        }

        #[test]
        fn malformed_end_blocks_in_progress_only() {
            let raw = timed("2021-07-12T10:00:00Z", "garbage");
            let event = classify_event(&raw, now("2021-07-12T10:30:00Z"));
            assert!(!event.in_progress);

            let event = classify_event(&raw, now("2021-07-12T09:59:00Z"));
            assert!(event.is_next_joinable);
        }

        #[test]
        fn empty_event() {
            let event = classify_event(&RawEvent::default(), now("2021-07-12T09:59:00Z"));
            assert!(event.id.is_empty());
            assert!(event.summary.is_empty());
            assert!(event.is_timed);
            assert!(event.start.is_none());
            assert!(!event.in_progress);
            assert!(!event.is_next_joinable);
            assert!(event.meeting_link.is_none());
            assert_eq!(event.icon, Icon::Default);
        }
    }

    #[test]
    fn icons_follow_summary() {
        let at = now("2021-07-12T08:00:00Z");
        let one = classify_event(&board_review().with_summary("You and I 1:1!"), at);
        assert_eq!(one.icon, Icon::OneOnOne);
        let standup = classify_event(&board_review().with_summary("MyTeam Standup"), at);
        assert_eq!(standup.icon, Icon::Standup);
    }

    #[test]
    fn classify_all_preserves_order_and_filters_candidates() {
        let raws = vec![
            board_review(),
            timed("2021-07-12T13:31:00Z", "2021-07-12T14:00:00Z"),
            RawEvent::new(
                "day",
                RawEventTime::from_date("2021-07-12"),
                RawEventTime::from_date("2021-07-13"),
            )
            .with_location(ZOOM),
        ];
        let events = classify_events(&raws, now("2021-07-12T09:29:00-04:00"));
        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["77gcalEventId_20210712T133000Z", "evt", "day"]);

        let candidates = join_candidates(&events);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "77gcalEventId_20210712T133000Z");
    }
}
