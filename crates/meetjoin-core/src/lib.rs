//! Core engine: raw events, meeting links, classification, join decision

pub mod classify;
pub mod error;
pub mod event;
pub mod icon;
pub mod join;
pub mod links;
pub mod raw_event;
pub mod source;
pub mod time;
pub mod tracing;

pub use classify::{EventClassifier, classify_event, classify_events, join_candidates};
pub use error::{LinkError, SourceError, SourceResult, TimeParseError};
pub use event::{LinkKind, LinkSource, NormalizedEvent, ResolvedLink};
pub use icon::Icon;
pub use join::{Decision, resolve_join_target};
pub use links::{MeetingLinkResolver, to_native_zoom_link};
pub use raw_event::{EventPayload, RawConferenceData, RawEntryPoint, RawEvent, RawEventTime};
pub use source::{EventSource, FetchOptions, JsonFileSource, StaticSource};
pub use time::{EventTime, TimeWindow, parse_event_time};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
