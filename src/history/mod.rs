//! Status-transition history for a single target.
//!
//! History is read from the target record already held in the snapshot; no
//! separate request is made. Entries are shown in the order the server sent
//! them.

use crate::snapshot::timestamp::format_local;
use crate::snapshot::StatusHistoryEvent;

/// Shown when a target has no recorded transitions.
pub const EMPTY_HISTORY_MESSAGE: &str = "No status changes recorded yet";

/// Placeholder for events without a usable timestamp.
const UNKNOWN_TIME: &str = "unknown time";

/// One rendered transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLine {
    /// Local wall-clock time of the transition
    pub timestamp: String,
    /// "OLD → NEW"
    pub transition: String,
}

impl From<&StatusHistoryEvent> for HistoryLine {
    fn from(event: &StatusHistoryEvent) -> Self {
        Self {
            timestamp: event
                .timestamp
                .as_ref()
                .map(format_local)
                .unwrap_or_else(|| UNKNOWN_TIME.to_string()),
            transition: format!("{} → {}", event.old_status, event.new_status),
        }
    }
}

/// Body of the history panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryContent {
    /// No transitions recorded
    Empty,
    Entries(Vec<HistoryLine>),
}

/// Everything the surface needs to draw the open history panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPanel {
    pub url: String,
    pub content: HistoryContent,
}

/// Holds the currently open history panel, if any.
#[derive(Debug, Default)]
pub struct HistoryViewer {
    open: Option<HistoryPanel>,
}

impl HistoryViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the history of `url`, replacing whatever was shown before.
    pub fn show(&mut self, url: &str, history: &[StatusHistoryEvent]) -> &HistoryPanel {
        let content = if history.is_empty() {
            HistoryContent::Empty
        } else {
            HistoryContent::Entries(history.iter().map(HistoryLine::from).collect())
        };

        self.open.insert(HistoryPanel {
            url: url.to_string(),
            content,
        })
    }

    /// Close the panel. Returns whether one was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn current(&self) -> Option<&HistoryPanel> {
        self.open.as_ref()
    }
}
