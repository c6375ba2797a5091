//! The `list` command.

use meetjoin_core::{EventSource, join_candidates, resolve_join_target};

use super::Session;
use crate::error::ClientResult;
use crate::render::{OutputFormat, Report};

/// Classifies upcoming events and renders them with the join decision.
pub fn list(
    source: &dyn EventSource,
    session: &Session,
    format: OutputFormat,
) -> ClientResult<String> {
    let events = session.classify(source)?;
    let candidates = join_candidates(&events);
    let (decision, chosen) = resolve_join_target(candidates.iter().copied());

    Report {
        events: &events,
        candidates,
        decision,
        chosen,
    }
    .render(format)
}
