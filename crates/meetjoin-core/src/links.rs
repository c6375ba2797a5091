//! Meeting link discovery and native-protocol conversion.
//!
//! [`MeetingLinkResolver`] looks for a join link in one raw event, searching
//! three places in order and stopping at the first hit:
//!
//! 1. the `location` field, split on commas
//! 2. the conference-data entry points
//! 3. the anchors of the HTML description
//!
//! A value counts as a meeting link when it contains one of the
//! [`PROVIDER_MARKERS`]. Zoom links are rewritten to the `zoommtg://` scheme
//! so the operating system hands them straight to the native client.
//!
//! # Example
//!
//! ```
//! use meetjoin_core::links::to_native_zoom_link;
//!
//! let native = to_native_zoom_link("https://foo.zoom.us/j/12345?pwd=abcd").unwrap();
//! assert_eq!(native, "zoommtg://foo.zoom.us/join?action=join&confno=12345&pwd=abcd");
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::{Captures, Regex};
use tracing::{debug, warn};
use url::Url;

use crate::error::LinkError;
use crate::event::{LinkKind, LinkSource, ResolvedLink};
use crate::raw_event::{RawConferenceData, RawEvent};

/// Substrings identifying a meeting provider, checked in order.
pub const PROVIDER_MARKERS: &[(&str, LinkKind)] = &[
    ("zoom.us", LinkKind::Zoom),
    ("meet.google.com", LinkKind::GoogleMeet),
];

/// Regex for extracting a URL embedded in free text.
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"'\)\]]+"#).expect("Invalid URL regex"));

/// Regex for detecting Microsoft Outlook SafeLinks.
///
/// SafeLinks wrap the original URL in a redirect through `safelinks.protection.outlook.com`.
/// The original URL is encoded in the `url` query parameter.
static SAFELINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^/]*safelinks\.protection\.outlook\.com/?\?[^?]*url=([^&]+)")
        .expect("Invalid SafeLink regex")
});

/// Runs of `<`, with the character following the last one when that
/// character can open a tag, comment, or declaration.
static LT_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<+([A-Za-z/!?]?)").expect("Invalid '<' run regex"));

/// Returns the provider whose marker appears in `text`, if any.
pub fn detect_provider(text: &str) -> Option<LinkKind> {
    PROVIDER_MARKERS
        .iter()
        .find(|(marker, _)| text.contains(marker))
        .map(|&(_, kind)| kind)
}

/// Finds the join link of a raw event.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeetingLinkResolver;

impl MeetingLinkResolver {
    /// Creates a new resolver.
    pub fn new() -> Self {
        Self
    }

    /// Returns the launchable meeting URI of `event`, if any.
    pub fn resolve(&self, event: &RawEvent) -> Option<String> {
        self.resolve_link(event).map(|link| link.url)
    }

    /// Like [`resolve`](Self::resolve), also reporting the provider and the
    /// source the link came from.
    pub fn resolve_link(&self, event: &RawEvent) -> Option<ResolvedLink> {
        let summary = event.summary_or_default();

        let (found, kind, source) = self
            .from_location(event.location.as_deref())
            .map(|(url, kind)| (url, kind, LinkSource::Location))
            .or_else(|| {
                self.from_conference_data(event.conference_data.as_ref(), summary)
                    .map(|(url, kind)| (url, kind, LinkSource::ConferenceData))
            })
            .or_else(|| {
                self.from_description(event.description.as_deref(), summary)
                    .map(|(url, kind)| (url, kind, LinkSource::Description))
            })?;

        let url = match kind {
            LinkKind::Zoom => native_or_original(&found),
            LinkKind::GoogleMeet => found,
        };

        Some(ResolvedLink { kind, source, url })
    }

    /// First comma-separated fragment of the location carrying any marker.
    ///
    /// Preference is positional: providers are not ranked against each other.
    fn from_location(&self, location: Option<&str>) -> Option<(String, LinkKind)> {
        location?.split(',').find_map(|fragment| {
            detect_provider(fragment).map(|kind| (fragment.trim().to_string(), kind))
        })
    }

    fn from_conference_data(
        &self,
        conference_data: Option<&RawConferenceData>,
        summary: &str,
    ) -> Option<(String, LinkKind)> {
        let entry_points = match conference_data.and_then(|c| c.entry_points.as_deref()) {
            Some(entry_points) if !entry_points.is_empty() => entry_points,
            _ => {
                debug!(summary, "no conference data found");
                return None;
            }
        };

        let found = entry_points.iter().find_map(|entry_point| {
            let uri = entry_point.uri.as_deref()?;
            detect_provider(uri).map(|kind| (uri.to_string(), kind))
        });
        if found.is_none() {
            debug!(summary, "conference data found, but no meeting links in it");
        }
        found
    }

    fn from_description(
        &self,
        description: Option<&str>,
        summary: &str,
    ) -> Option<(String, LinkKind)> {
        let found = first_meeting_anchor(description?, summary);
        if found.is_none() {
            debug!(summary, "no meeting links in description");
        }
        found
    }
}

/// Scans the anchors of an HTML fragment in document order and returns the
/// first `href` carrying a provider marker.
///
/// The scan is lenient the way HTML parsers are: unclosed and mismatched
/// tags, stray `<` in text, and duplicate or malformed attributes do not stop
/// it. Markup the reader cannot make sense of is skipped.
fn first_meeting_anchor(html: &str, summary: &str) -> Option<(String, LinkKind)> {
    let html = escape_stray_lt(html);
    let mut reader = Reader::from_str(&html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                if !e.local_name().as_ref().eq_ignore_ascii_case(b"a") {
                    continue;
                }
                let mut attributes = e.html_attributes();
                attributes.with_checks(false);
                for attr in attributes {
                    let Ok(attr) = attr else { continue };
                    if !attr.key.as_ref().eq_ignore_ascii_case(b"href") {
                        continue;
                    }
                    let href = match attr.unescape_value() {
                        Ok(value) => value.into_owned(),
                        Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
                    };
                    if let Some(kind) = detect_provider(&href) {
                        return Some((href, kind));
                    }
                }
            }
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(err) => {
                debug!(summary, position, error = %err, "skipping unreadable markup in description");
                if reader.buffer_position() == position {
                    return None;
                }
            }
        }
    }
}

/// Escapes every `<` that HTML would read as text.
fn escape_stray_lt(html: &str) -> Cow<'_, str> {
    LT_RUN_REGEX.replace_all(html, |caps: &Captures<'_>| {
        let run = caps[0].len() - caps[1].len();
        if caps[1].is_empty() {
            "&lt;".repeat(run)
        } else {
            format!("{}<{}", "&lt;".repeat(run - 1), &caps[1])
        }
    })
}

fn native_or_original(url: &str) -> String {
    match to_native_zoom_link(url) {
        Ok(native) => native,
        Err(err) => {
            warn!(error = %err, "could not convert zoom link, keeping it as is");
            url.to_string()
        }
    }
}

/// Rewrites a Zoom web link into the `zoommtg://` protocol.
///
/// The last path segment becomes the conference number and the `pwd` query
/// parameter, when present, is carried over:
///
/// `https://example.zoom.us/j/1234?pwd=abcd` becomes
/// `zoommtg://example.zoom.us/join?action=join&confno=1234&pwd=abcd`.
///
/// Outlook SafeLinks are unwrapped first, and when `url` is free text the
/// first URL inside it is used.
pub fn to_native_zoom_link(url: &str) -> Result<String, LinkError> {
    let unwrapped = unwrap_safelink(url.trim());
    let candidate = URL_REGEX
        .find(&unwrapped)
        .map_or(unwrapped.as_str(), |m| m.as_str());

    let parsed = Url::parse(candidate).map_err(|source| LinkError::InvalidUrl {
        url: candidate.to_string(),
        source,
    })?;
    let host = parsed.host_str().ok_or_else(|| LinkError::MissingHost {
        url: candidate.to_string(),
    })?;

    let confno = parsed.path().rsplit('/').next().unwrap_or_default();
    let mut native = format!("zoommtg://{host}/join?action=join&confno={confno}");

    if let Some((_, pwd)) = parsed.query_pairs().find(|(key, _)| key == "pwd") {
        native.push_str("&pwd=");
        native.push_str(&pwd);
    }

    Ok(native)
}

/// Unwraps a Microsoft Outlook SafeLink to get the original URL.
///
/// If the URL is not a SafeLink, it is returned unchanged.
fn unwrap_safelink(url: &str) -> String {
    if let Some(caps) = SAFELINK_REGEX.captures(url) {
        if let Some(encoded) = caps.get(1) {
            if let Ok(decoded) = urlencoding::decode(encoded.as_str()) {
                return decoded.into_owned();
            }
        }
    }
    url.to_string()
}
