//! Output rendering for the list command.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use meetjoin_core::{Decision, NormalizedEvent};

use crate::alfred::JsonUtilityFormat;
use crate::error::ClientResult;

/// Output format of the list command.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text for terminals
    #[default]
    Stdout,
    /// Alfred JSON Utility object
    Alfred,
    /// Events and decision as JSON
    Json,
}

/// Everything a list run produced.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    /// Every classified event, in fetch order.
    pub events: &'a [NormalizedEvent],
    /// The subset offered for joining.
    pub candidates: Vec<&'a NormalizedEvent>,
    pub decision: Decision,
    pub chosen: Option<&'a NormalizedEvent>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    decision: Decision,
    chosen: Option<&'a NormalizedEvent>,
    events: &'a [NormalizedEvent],
}

impl Report<'_> {
    /// Renders the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> ClientResult<String> {
        match format {
            OutputFormat::Stdout => Ok(self.render_text()),
            OutputFormat::Alfred => {
                JsonUtilityFormat::build(&self.candidates, self.decision, self.chosen)?.to_json()
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonReport {
                decision: self.decision,
                chosen: self.chosen,
                events: self.events,
            })?),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        if self.events.is_empty() {
            out.push_str("No upcoming events\n");
        }
        for event in self.events {
            let start = event
                .start
                .map_or_else(|| "?".to_string(), |s| s.to_iso_string());
            let _ = write!(out, "{start}  {}", event.summary);
            if !event.is_timed {
                out.push_str("  [all day]");
            }
            if event.in_progress {
                out.push_str("  [in progress]");
            }
            if event.is_next_joinable {
                out.push_str("  [starting soon]");
            }
            if let Some(ref link) = event.meeting_link {
                let _ = write!(out, "  {link}");
            }
            out.push('\n');
        }
        let _ = writeln!(out, "decision: {}", self.decision);
        if let Some(link) = self.chosen.and_then(|e| e.meeting_link.as_deref()) {
            let _ = writeln!(out, "join: {link}");
        }
        out
    }
}
