//! Live dashboard state engine.
//!
//! [`Dashboard`] owns every piece of client state: the snapshot store, the
//! search filter, the rendered frame, statistics, the history panel and the
//! mutation controls. It is driven one [`DashboardEvent`] at a time and answers
//! with a list of [`Effect`]s for the runtime to carry out. It never performs
//! I/O itself.
//!
//! Each field has exactly one writer:
//! - snapshot store: the push handler
//! - filter term: the search handler
//! - statistics panel: the statistics completion handler
//!
//! The snapshot store publishes every replacement to two listeners, the view
//! path and the statistics path. Both are drained right after each push, so a
//! snapshot is always rendered before the next push is looked at.

pub mod input;
pub mod runtime;

pub use input::{UserCommand, HELP};
pub use runtime::DashboardRuntime;

use crate::api::{ApiError, ExportFormat};
use crate::filter::{filter, FilterState};
use crate::history::{HistoryPanel, HistoryViewer};
use crate::mutation::{
    validate_target_url, AddInput, MutationKind, MutationOutcome, RemovalGuard, RemovalRequest,
};
use crate::push::PushEvent;
use crate::render::{render, Frame, RowAction, RowRef};
use crate::snapshot::{Snapshot, SnapshotListener, SnapshotStore};
use crate::stats::{Statistics, StatisticsPanel};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Shown when the statistics request fails.
pub const STATISTICS_FAILED: &str = "Failed to load statistics";

/// Inputs to the dashboard.
#[derive(Debug)]
pub enum DashboardEvent {
    Push(PushEvent),
    Input(UserCommand),
    StatisticsLoaded(Result<Statistics, ApiError>),
    MutationCompleted(MutationOutcome),
}

/// Work requested by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Draw the current screen
    Redraw,
    /// Request aggregate statistics
    FetchStatistics,
    /// Send a create request for `url`
    Create { url: String },
    /// Send a delete request for `url`
    Delete { url: String },
    /// Show a message to the user
    Notify(Notice),
    /// Point the user at an export download
    OpenExport(ExportFormat),
    /// Leave the dashboard
    Quit,
}

/// User-facing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Input rejected locally
    Validation(String),
    /// A server request failed
    RequestFailed(String),
    /// Waiting for the user to confirm a removal
    ConfirmRemoval { url: String },
    Info(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Validation(msg) | Notice::RequestFailed(msg) | Notice::Info(msg) => {
                f.write_str(msg)
            }
            Notice::ConfirmRemoval { url } => {
                write!(f, "Stop monitoring {}? Type y to confirm or n to cancel", url)
            }
        }
    }
}

/// State of the push connection as far as the user is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Never connected yet
    Connecting,
    Live,
    /// Connection lost; the displayed data may be outdated
    Stale { reason: String, retry_in: Duration },
}

/// Everything a surface needs to draw one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub frame: Frame,
    pub statistics: Option<StatisticsPanel>,
    pub history: Option<HistoryPanel>,
    pub connection: ConnectionState,
    pub filter_term: String,
    pub add_input: String,
    pub pending_removal: Option<String>,
}

/// Display collaborator the runtime draws onto.
pub trait Surface: Send + 'static {
    fn draw(&mut self, screen: &Screen);
    fn notify(&mut self, notice: &Notice);
}

/// Client-side state container.
pub struct Dashboard {
    store: SnapshotStore,
    view_listener: SnapshotListener,
    stats_listener: SnapshotListener,
    filter: FilterState,
    frame: Frame,
    statistics: Option<StatisticsPanel>,
    history: HistoryViewer,
    add_input: AddInput,
    removal: RemovalGuard,
    connection: ConnectionState,
}

impl Dashboard {
    pub fn new() -> Self {
        let store = SnapshotStore::new();
        let view_listener = store.subscribe();
        let stats_listener = store.subscribe();

        Self {
            store,
            view_listener,
            stats_listener,
            filter: FilterState::new(),
            frame: Frame::default(),
            statistics: None,
            history: HistoryViewer::new(),
            add_input: AddInput::default(),
            removal: RemovalGuard::default(),
            connection: ConnectionState::Connecting,
        }
    }

    /// Process one event to completion.
    pub fn handle(&mut self, event: DashboardEvent) -> Vec<Effect> {
        match event {
            DashboardEvent::Push(push) => self.on_push(push),
            DashboardEvent::Input(command) => self.on_command(command),
            DashboardEvent::StatisticsLoaded(result) => self.on_statistics(result),
            DashboardEvent::MutationCompleted(outcome) => self.on_mutation(outcome),
        }
    }

    fn on_push(&mut self, push: PushEvent) -> Vec<Effect> {
        match push {
            PushEvent::Connected => {
                self.connection = ConnectionState::Live;
                vec![Effect::Redraw]
            }
            PushEvent::Snapshot(snapshot) => {
                self.store.replace(snapshot);
                self.drain_listeners()
            }
            PushEvent::Disconnected { reason, retry_in } => {
                // Keep the last snapshot on screen, just mark it stale
                self.connection = ConnectionState::Stale { reason, retry_in };
                vec![Effect::Redraw]
            }
        }
    }

    fn drain_listeners(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(snapshot) = self.view_listener.poll() {
            self.refresh_view(&snapshot);
            effects.push(Effect::Redraw);
        }
        if self.stats_listener.poll().is_some() {
            effects.push(Effect::FetchStatistics);
        }
        effects
    }

    fn refresh_view(&mut self, snapshot: &Snapshot) {
        let term = self.filter.term();
        let view = filter(snapshot, term);
        self.frame = render(&view, term, self.store.is_loaded());
    }

    fn on_command(&mut self, command: UserCommand) -> Vec<Effect> {
        match command {
            UserCommand::Search(term) => self.on_search(&term),
            UserCommand::Add(input) => self.on_add(&input),
            UserCommand::Remove(row) => match self.frame.bindings().hook(RowAction::Remove, &row) {
                Some(hook) => self.on_request_removal(&hook.url),
                None => vec![no_such_row(&row)],
            },
            UserCommand::Confirm(confirmed) => self.on_confirm(confirmed),
            UserCommand::History(row) => match self.frame.bindings().hook(RowAction::History, &row)
            {
                Some(hook) => self.on_request_history(&hook.url),
                None => vec![no_such_row(&row)],
            },
            UserCommand::CloseHistory => {
                if self.history.close() {
                    vec![Effect::Redraw]
                } else {
                    Vec::new()
                }
            }
            UserCommand::Export(format) => vec![Effect::OpenExport(format)],
            UserCommand::Help => vec![Effect::Notify(Notice::Info(HELP.to_string()))],
            UserCommand::Quit => vec![Effect::Quit],
            UserCommand::Unknown(line) => vec![Effect::Notify(Notice::Info(format!(
                "Unknown command: {} (type `help` for a list)",
                line
            )))],
        }
    }

    /// Search-input handler: the only writer of the filter term.
    fn on_search(&mut self, raw: &str) -> Vec<Effect> {
        self.filter.set(raw);
        let snapshot = self.store.current();
        self.refresh_view(&snapshot);
        vec![Effect::Redraw]
    }

    fn on_add(&mut self, input: &str) -> Vec<Effect> {
        self.add_input.set(input);
        match validate_target_url(input) {
            Ok(url) => {
                tracing::debug!(url = %url, "Sending create request");
                vec![Effect::Create { url }, Effect::Redraw]
            }
            Err(e) => vec![
                Effect::Notify(Notice::Validation(e.to_string())),
                Effect::Redraw,
            ],
        }
    }

    fn on_request_removal(&mut self, url: &str) -> Vec<Effect> {
        match self.removal.request(url) {
            RemovalRequest::Prompt(url) => vec![
                Effect::Notify(Notice::ConfirmRemoval { url }),
                Effect::Redraw,
            ],
            RemovalRequest::AlreadyPending => Vec::new(),
        }
    }

    fn on_confirm(&mut self, confirmed: bool) -> Vec<Effect> {
        if self.removal.pending().is_none() {
            return vec![Effect::Notify(Notice::Info(
                "Nothing to confirm".to_string(),
            ))];
        }

        match self.removal.resolve(confirmed) {
            Some(url) => {
                tracing::debug!(url = %url, "Sending delete request");
                vec![Effect::Delete { url }, Effect::Redraw]
            }
            None => vec![
                Effect::Notify(Notice::Info("Removal cancelled".to_string())),
                Effect::Redraw,
            ],
        }
    }

    fn on_request_history(&mut self, url: &str) -> Vec<Effect> {
        let snapshot = self.store.current();
        let history = snapshot
            .find(url)
            .map(|t| t.status_history.as_slice())
            .unwrap_or_default();
        self.history.show(url, history);
        vec![Effect::Redraw]
    }

    fn on_statistics(&mut self, result: Result<Statistics, ApiError>) -> Vec<Effect> {
        match result {
            Ok(stats) => {
                self.statistics = Some(StatisticsPanel::from(&stats));
                vec![Effect::Redraw]
            }
            Err(e) => {
                tracing::warn!(error = %e, "Statistics request failed");
                vec![Effect::Notify(Notice::RequestFailed(
                    STATISTICS_FAILED.to_string(),
                ))]
            }
        }
    }

    fn on_mutation(&mut self, outcome: MutationOutcome) -> Vec<Effect> {
        if let Some(message) = outcome.failure_message() {
            tracing::warn!(
                url = %outcome.url,
                kind = ?outcome.kind,
                error = %message,
                "Mutation request failed"
            );
            return vec![Effect::Notify(Notice::RequestFailed(message))];
        }

        tracing::info!(url = %outcome.url, kind = ?outcome.kind, "Mutation accepted");
        match outcome.kind {
            MutationKind::Add if self.add_input.clear_if(&outcome.url) => vec![Effect::Redraw],
            // The change becomes visible with the next snapshot
            _ => Vec::new(),
        }
    }

    /// Current screen contents.
    pub fn screen(&self) -> Screen {
        Screen {
            frame: self.frame.clone(),
            statistics: self.statistics.clone(),
            history: self.history.current().cloned(),
            connection: self.connection.clone(),
            filter_term: self.filter.term().as_str().to_string(),
            add_input: self.add_input.text().to_string(),
            pending_removal: self.removal.pending().map(str::to_string),
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.current()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn statistics(&self) -> Option<&StatisticsPanel> {
        self.statistics.as_ref()
    }

    pub fn history(&self) -> Option<&HistoryPanel> {
        self.history.current()
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn add_input(&self) -> &str {
        self.add_input.text()
    }

    pub fn pending_removal(&self) -> Option<&str> {
        self.removal.pending()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

fn no_such_row(row: &RowRef) -> Effect {
    let what = match row {
        RowRef::Index(index) => format!("row {}", index),
        RowRef::Url(url) => url.clone(),
    };
    Effect::Notify(Notice::Info(format!("No displayed website matches {}", what)))
}
