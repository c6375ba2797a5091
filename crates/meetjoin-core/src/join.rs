//! Picking the one meeting to join.
//!
//! The policy never guesses: two meetings about to start, or two running at
//! once, are reported as [`Decision::MultipleOptions`] and left to the user.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::NormalizedEvent;

/// Outcome of join resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Exactly one meeting was selected.
    FoundNextMeeting,
    /// Candidates exist but none stands out.
    MultipleOptions,
    /// There is nothing to join.
    NoOptions,
}

impl Decision {
    /// The wire name of this decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoundNextMeeting => "FoundNextMeeting",
            Self::MultipleOptions => "MultipleOptions",
            Self::NoOptions => "NoOptions",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects the meeting to join among already filtered candidates.
///
/// A single meeting about to start wins over anything in progress; failing
/// that, a single in-progress meeting wins.
pub fn resolve_join_target<'a, I>(candidates: I) -> (Decision, Option<&'a NormalizedEvent>)
where
    I: IntoIterator<Item = &'a NormalizedEvent>,
{
    let candidates: Vec<&NormalizedEvent> = candidates.into_iter().collect();
    if candidates.is_empty() {
        debug!("no meeting candidates");
        return (Decision::NoOptions, None);
    }

    let next_joinable = exactly_one(candidates.iter().copied().filter(|e| e.is_next_joinable));
    let in_progress = exactly_one(candidates.iter().copied().filter(|e| e.in_progress));

    match next_joinable.or(in_progress) {
        Some(chosen) => {
            debug!(id = %chosen.id, summary = %chosen.summary, "found next meeting");
            (Decision::FoundNextMeeting, Some(chosen))
        }
        None => {
            debug!(count = candidates.len(), "multiple meeting options");
            (Decision::MultipleOptions, None)
        }
    }
}

fn exactly_one<T>(mut iter: impl Iterator<Item = T>) -> Option<T> {
    let first = iter.next()?;
    match iter.next() {
        Some(_) => None,
        None => Some(first),
    }
}
