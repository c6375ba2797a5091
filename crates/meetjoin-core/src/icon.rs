//! Presentation icons selected from event titles.

use serde::{Deserialize, Serialize};

/// The icon shown next to an event by the launcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    OneOnOne,
    Standup,
    #[default]
    Default,
}

/// Title keywords and the icon they select, in priority order.
///
/// Matching is a case-sensitive substring test; the first hit wins.
pub const ICON_RULES: &[(&str, Icon)] = &[("1:1", Icon::OneOnOne), ("Standup", Icon::Standup)];

impl Icon {
    /// Picks the icon for an event title.
    pub fn for_title(title: &str) -> Self {
        ICON_RULES
            .iter()
            .find(|(keyword, _)| title.contains(keyword))
            .map(|&(_, icon)| icon)
            .unwrap_or_default()
    }

    /// The icon file shipped with the launcher workflow.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::OneOnOne => "one.png",
            Self::Standup => "standup.png",
            Self::Default => "icon.png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_matches() {
        assert_eq!(Icon::for_title("You and I 1:1!"), Icon::OneOnOne);
        assert_eq!(Icon::for_title("MyTeam Standup"), Icon::Standup);
        assert_eq!(Icon::for_title("JIRA Board Review"), Icon::Default);
        assert_eq!(Icon::for_title(""), Icon::Default);
    }

    #[test]
    fn one_on_one_beats_standup() {
        assert_eq!(Icon::for_title("Standup 1:1"), Icon::OneOnOne);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(Icon::for_title("daily standup"), Icon::Default);
    }

    #[test]
    fn file_names() {
        assert_eq!(Icon::OneOnOne.file_name(), "one.png");
        assert_eq!(Icon::Standup.file_name(), "standup.png");
        assert_eq!(Icon::Default.file_name(), "icon.png");
    }
}
