//! Render/bind layer.
//!
//! [`render`] turns the filtered view into a [`Frame`]: display-ready rows, an
//! optional empty-state, and a fresh [`Bindings`] table. Row actions are only
//! ever resolved through the bindings of the latest frame, so a row that is no
//! longer displayed cannot trigger anything.

use crate::filter::FilterTerm;
use crate::snapshot::timestamp::format_local;
use crate::snapshot::MonitoredTarget;
use std::convert::Infallible;
use std::str::FromStr;

/// Shown for values that have not been measured yet.
pub const PLACEHOLDER: &str = "—";

/// Why the view has no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// No snapshot received yet
    Loading,
    /// The server monitors nothing
    NoTargets,
    /// Targets exist but none match the search term
    NoMatches { term: String },
}

impl EmptyState {
    pub fn message(&self) -> String {
        match self {
            EmptyState::Loading => "Waiting for the first update from the server...".to_string(),
            EmptyState::NoTargets => {
                "No websites are being monitored yet. Add one with `add <url>`.".to_string()
            }
            EmptyState::NoMatches { term } => format!("No websites match \"{}\"", term),
        }
    }
}

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position in the current frame
    pub index: usize,
    pub url: String,
    pub status: String,
    pub is_up: bool,
    pub response_time: String,
    pub avg_response_time: String,
    pub last_checked: String,
    pub uptime: String,
    /// Tooltip context for the uptime figure
    pub uptime_detail: String,
}

impl Row {
    fn new(index: usize, target: &MonitoredTarget) -> Self {
        Self {
            index,
            url: target.url.clone(),
            status: target.status.to_string(),
            is_up: target.is_up,
            response_time: format_response_time(target.response_time_ms),
            avg_response_time: format_response_time(target.avg_response_time_ms),
            last_checked: target
                .last_checked
                .as_ref()
                .map(format_local)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            uptime: format!("{:.1}%", target.uptime_percentage),
            uptime_detail: format!("{} checks", target.total_checks),
        }
    }
}

/// How the user points at a row: by its number in the frame or by its url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRef {
    Index(usize),
    Url(String),
}

impl FromStr for RowRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<usize>() {
            Ok(index) => RowRef::Index(index),
            Err(_) => RowRef::Url(s.to_string()),
        })
    }
}

/// Per-row interaction affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    History,
    Remove,
}

/// A bound affordance, ready to route into the history viewer or the
/// mutation commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    pub action: RowAction,
    pub url: String,
}

/// Row affordances of one frame. Rebuilt on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    urls: Vec<String>,
}

impl Bindings {
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Resolve a row reference against this frame.
    pub fn resolve(&self, row: &RowRef) -> Option<&str> {
        match row {
            RowRef::Index(index) => index
                .checked_sub(1)
                .and_then(|i| self.urls.get(i))
                .map(String::as_str),
            RowRef::Url(url) => self.urls.iter().find(|u| *u == url).map(String::as_str),
        }
    }

    /// Fire `action` on `row`, if that row is displayed.
    pub fn hook(&self, action: RowAction, row: &RowRef) -> Option<Hook> {
        self.resolve(row).map(|url| Hook {
            action,
            url: url.to_string(),
        })
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Row>,
    pub empty: Option<EmptyState>,
    bindings: Bindings,
}

impl Frame {
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

impl Default for Frame {
    fn default() -> Self {
        render(&[], &FilterTerm::default(), false)
    }
}

/// Render the filtered view.
///
/// `loaded` is false until the first snapshot has arrived. An empty view with a
/// non-empty term is a "no match", otherwise "no targets".
pub fn render(view: &[&MonitoredTarget], term: &FilterTerm, loaded: bool) -> Frame {
    let rows: Vec<Row> = view
        .iter()
        .enumerate()
        .map(|(i, target)| Row::new(i + 1, target))
        .collect();

    let empty = if !rows.is_empty() {
        None
    } else if !loaded {
        Some(EmptyState::Loading)
    } else if term.is_empty() {
        Some(EmptyState::NoTargets)
    } else {
        Some(EmptyState::NoMatches {
            term: term.as_str().to_string(),
        })
    };

    let bindings = Bindings {
        urls: rows.iter().map(|r| r.url.clone()).collect(),
    };

    Frame {
        rows,
        empty,
        bindings,
    }
}

/// Format a response time, using the placeholder for "not yet measured".
pub fn format_response_time(ms: f64) -> String {
    if ms <= 0.0 || !ms.is_finite() {
        PLACEHOLDER.to_string()
    } else if ms < 0.5 {
        // Measured, but would round to "0 ms"
        "<1 ms".to_string()
    } else {
        format!("{} ms", ms.round() as u64)
    }
}
