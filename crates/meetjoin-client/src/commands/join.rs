//! The `join` command.
//!
//! Only prints the link. Opening it is left to the caller, e.g.
//! `open "$(meetjoin join)"`.

use tracing::info;

use meetjoin_core::{Decision, EventSource, join_candidates, resolve_join_target};

use super::Session;
use crate::error::{ClientError, ClientResult};

/// Returns the link of the one meeting to join.
///
/// # Errors
///
/// [`ClientError::NoMeetingToJoin`] when zero or several meetings qualify.
pub fn join(source: &dyn EventSource, session: &Session) -> ClientResult<String> {
    let events = session.classify(source)?;
    let candidates = join_candidates(&events);

    match resolve_join_target(candidates.iter().copied()) {
        (Decision::FoundNextMeeting, Some(event)) => {
            info!(id = %event.id, summary = %event.summary, "joining");
            event
                .meeting_link
                .clone()
                .ok_or(ClientError::NoMeetingToJoin(Decision::NoOptions))
        }
        (decision, _) => Err(ClientError::NoMeetingToJoin(decision)),
    }
}
