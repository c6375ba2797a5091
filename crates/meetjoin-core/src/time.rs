//! Time types for calendar events.
//!
//! This module provides [`EventTime`] for representing event start/end times
//! (which may be either a specific datetime or an all-day date),
//! [`parse_event_time`] for turning a raw `start`/`end` record into one, and
//! [`TimeWindow`] for defining fetch ranges.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimeParseError;
use crate::raw_event::RawEventTime;

/// Represents the time of a calendar event.
///
/// - **DateTime**: a specific instant; the source offset is kept so the
///   event can be rendered the way the calendar reported it.
/// - **AllDay**: a date without a specific time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    /// A specific datetime with its original offset.
    DateTime(DateTime<FixedOffset>),
    /// An all-day event date.
    AllDay(NaiveDate),
}

impl EventTime {
    /// Creates a new `EventTime::DateTime` from a UTC datetime.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt.fixed_offset())
    }

    /// Creates a new `EventTime::AllDay` from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Returns `true` if this is an all-day event time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// Converts to a UTC datetime for comparison purposes.
    ///
    /// For all-day events, returns midnight UTC on that date.
    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => dt.with_timezone(&Utc),
            Self::AllDay(date) => date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }

    /// Formats the value the way the calendar API does: RFC 3339 for
    /// datetimes, `YYYY-MM-DD` for all-day dates.
    pub fn to_iso_string(&self) -> String {
        match self {
            Self::DateTime(dt) => dt.to_rfc3339(),
            Self::AllDay(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

/// Parses a raw `start`/`end` record.
///
/// `dateTime` wins whenever it is present, even if it turns out to be
/// malformed; `date` is only consulted when `dateTime` is absent. Timestamps
/// without an offset are taken as UTC.
pub fn parse_event_time(raw: &RawEventTime) -> Result<EventTime, TimeParseError> {
    if let Some(ref value) = raw.date_time {
        return parse_date_time(value).map(EventTime::DateTime);
    }
    if let Some(ref value) = raw.date {
        return NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(EventTime::AllDay)
            .map_err(|source| TimeParseError::InvalidDate {
                value: value.clone(),
                source,
            });
    }
    Err(TimeParseError::MissingValue)
}

fn parse_date_time(value: &str) -> Result<DateTime<FixedOffset>, TimeParseError> {
    let trimmed = value.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|err| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc().fixed_offset())
                .map_err(|_| err)
        })
        .map_err(|source| TimeParseError::InvalidDateTime {
            value: value.to_string(),
            source,
        })
}

/// A time window for fetching calendar events.
///
/// Represents a half-open interval `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// Creates a time window starting from now extending the given duration.
    ///
    /// The end saturates at the latest representable instant.
    pub fn from_now(now: DateTime<Utc>, duration: Duration) -> Self {
        let end = now
            .checked_add_signed(duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::new(now, end)
    }

    /// Returns the duration of this time window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks whether an event may overlap this window.
    ///
    /// Missing bounds never exclude the event: an event is only dropped when
    /// its known end is before the window starts or its known start is at or
    /// after the window end.
    pub fn admits(&self, start: Option<&EventTime>, end: Option<&EventTime>) -> bool {
        let ends_before = end.is_some_and(|e| e.to_utc_datetime() < self.start);
        let starts_after = start.is_some_and(|s| s.to_utc_datetime() >= self.end);
        !ends_before && !starts_after
    }
}
