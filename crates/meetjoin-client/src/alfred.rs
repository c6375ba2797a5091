//! Alfred workflow output.
//!
//! The list command emits a JSON Utility object. Its `arg` is a serialized
//! Script Filter so a later workflow step can let the user pick a meeting
//! when no single one was selected. Absent values are written as `null`.

use std::collections::BTreeMap;

use serde::Serialize;

use meetjoin_core::{Decision, EventTime, NormalizedEvent};

use crate::error::ClientResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemIcon {
    pub path: String,
}

/// Per-item variables handed to the next workflow step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemVariables {
    pub title: String,
    pub start: Option<String>,
}

/// One Script Filter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub arg: Option<String>,
    pub variables: Option<ItemVariables>,
    pub icon: Option<ItemIcon>,
}

impl From<&NormalizedEvent> for Item {
    fn from(event: &NormalizedEvent) -> Self {
        let subtitle = match event.start {
            Some(start) => format!("Starting at {}", start_label(&start)),
            None => "Starting at unknown time".to_string(),
        };
        Self {
            uid: event.id.clone(),
            title: event.summary.clone(),
            subtitle,
            arg: event.meeting_link.clone(),
            variables: Some(ItemVariables {
                title: event.summary.clone(),
                start: event.start.map(|s| s.to_iso_string()),
            }),
            icon: Some(ItemIcon {
                path: event.icon.file_name().to_string(),
            }),
        }
    }
}

/// `2021-07-12 09:30:00-04:00`, the human form of a start time.
fn start_label(start: &EventTime) -> String {
    match start {
        EventTime::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
        EventTime::AllDay(_) => start.to_iso_string(),
    }
}

/// Script Filter output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptFilterOutput {
    pub items: Vec<Item>,
}

impl ScriptFilterOutput {
    pub fn to_json(&self) -> ClientResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Workflow variables describing the join decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowVariables {
    /// Always set; Alfred shows booleans as 0/1.
    pub need_to_prompt: bool,
    pub next_meeting: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

impl WorkflowVariables {
    pub fn new(decision: Decision, chosen: Option<&NormalizedEvent>) -> Self {
        let mut vars = Self {
            need_to_prompt: true,
            next_meeting: decision,
            zoom_link: None,
            title: None,
            start: None,
        };
        if let Some(event) = chosen {
            vars.zoom_link = event.meeting_link.clone();
            vars.title = Some(event.summary.clone());
            vars.start = event.start.map(|s| s.to_iso_string());
        }
        vars
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlfredWorkflow {
    pub arg: String,
    pub config: BTreeMap<String, String>,
    pub variables: WorkflowVariables,
}

/// JSON Utility output, the top-level object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonUtilityFormat {
    pub alfredworkflow: AlfredWorkflow,
}

impl JsonUtilityFormat {
    /// Builds the workflow output for the join candidates and the decision.
    pub fn build(
        candidates: &[&NormalizedEvent],
        decision: Decision,
        chosen: Option<&NormalizedEvent>,
    ) -> ClientResult<Self> {
        let filter = ScriptFilterOutput {
            items: candidates.iter().map(|e| Item::from(*e)).collect(),
        };
        Ok(Self {
            alfredworkflow: AlfredWorkflow {
                arg: filter.to_json()?,
                config: BTreeMap::new(),
                variables: WorkflowVariables::new(decision, chosen),
            },
        })
    }

    pub fn to_json(&self) -> ClientResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
