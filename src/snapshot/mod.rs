//! Snapshot store for the server-authoritative target list.
//!
//! Every push from the server carries the complete list of monitored targets.
//! The store swaps it in wholesale; there is no diffing and no field-level merge.
//! Each replacement is published on a `watch` channel so the view path and the
//! statistics path can react to it independently.

mod target;
pub mod timestamp;
pub mod wire;

pub use target::*;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// One complete listing of monitored targets at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    targets: Vec<MonitoredTarget>,
}

impl Snapshot {
    pub fn new(targets: Vec<MonitoredTarget>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[MonitoredTarget] {
        &self.targets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonitoredTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Look up a target by its url.
    pub fn find(&self, url: &str) -> Option<&MonitoredTarget> {
        self.targets.iter().find(|t| t.url == url)
    }
}

impl From<Vec<MonitoredTarget>> for Snapshot {
    fn from(targets: Vec<MonitoredTarget>) -> Self {
        Self::new(targets)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a MonitoredTarget;
    type IntoIter = std::slice::Iter<'a, MonitoredTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

/// Holds the latest snapshot and notifies listeners when it is replaced.
///
/// # Examples
///
/// ```
/// use sitewatch::snapshot::{MonitoredTarget, Snapshot, SnapshotStore};
///
/// let store = SnapshotStore::new();
/// let mut listener = store.subscribe();
/// assert!(store.current().is_empty());
/// assert!(listener.poll().is_none());
/// ```
pub struct SnapshotStore {
    tx: watch::Sender<Arc<Snapshot>>,
    loaded: bool,
}

impl SnapshotStore {
    /// Create an empty store. No snapshot has been received yet.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(Snapshot::default()));
        Self { tx, loaded: false }
    }

    /// Swap in a new snapshot, discarding the previous one entirely.
    ///
    /// Crate-private: the dashboard's push handler is the only writer.
    pub(crate) fn replace(&mut self, snapshot: Snapshot) {
        tracing::debug!(targets = snapshot.len(), "Snapshot replaced");
        self.tx.send_replace(Arc::new(snapshot));
        self.loaded = true;
    }

    /// The latest snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.tx.borrow())
    }

    /// Whether at least one snapshot has been received.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Register a listener that observes every subsequent replacement.
    pub fn subscribe(&self) -> SnapshotListener {
        SnapshotListener {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of a store subscription.
pub struct SnapshotListener {
    rx: watch::Receiver<Arc<Snapshot>>,
}

impl SnapshotListener {
    /// Returns the new snapshot if the store was replaced since the last poll.
    pub fn poll(&mut self) -> Option<Arc<Snapshot>> {
        match self.rx.has_changed() {
            Ok(true) => Some(Arc::clone(&self.rx.borrow_and_update())),
            _ => None,
        }
    }

    /// Wait for the next replacement. Returns `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<Arc<Snapshot>> {
        self.rx.changed().await.ok()?;
        Some(Arc::clone(&self.rx.borrow_and_update()))
    }
}
