//! WebSocket push channel.
//!
//! The server pushes the full target list as a JSON array whenever anything
//! changes. This task keeps the connection open, turns every message into a
//! [`PushEvent`], and reconnects with a capped exponential backoff when the
//! connection drops. Until it is back, the dashboard keeps showing the last
//! snapshot it received.

mod error;

pub use error::PushError;

use crate::config::ReconnectConfig;
use crate::snapshot::Snapshot;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

/// Connection lifecycle and payload events delivered to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    /// Connection (re-)established
    Connected,
    /// A complete snapshot arrived
    Snapshot(Snapshot),
    /// Connection lost; a reconnect will be attempted after `retry_in`
    Disconnected { reason: String, retry_in: Duration },
}

/// Decode one push payload.
pub fn parse_snapshot(text: &str) -> Result<Snapshot, PushError> {
    serde_json::from_str(text).map_err(|e| PushError::Protocol(e.to_string()))
}

/// Background task that owns the push connection.
pub struct PushChannel {
    url: String,
    reconnect: ReconnectConfig,
}

impl PushChannel {
    pub fn new(url: impl Into<String>, reconnect: ReconnectConfig) -> Self {
        Self {
            url: url.into(),
            reconnect,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Start the push channel background task.
    /// Returns a JoinHandle that resolves when the channel stops.
    pub fn start(
        self,
        tx: mpsc::Sender<PushEvent>,
        cancel_token: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::info!("Push channel shutting down");
                }
                _ = self.run(tx) => {
                    tracing::debug!("Push channel receiver dropped");
                }
            }
        })
    }

    /// Connect, forward snapshots, reconnect. Returns only when `tx` is closed.
    async fn run(&self, tx: mpsc::Sender<PushEvent>) {
        let mut delay = self.reconnect.initial_delay();

        loop {
            let (reason, connected) = match self.session(&tx).await {
                Ok(SessionEnd::ReceiverGone) => return,
                Ok(SessionEnd::Closed) => (PushError::Closed.to_string(), true),
                Ok(SessionEnd::Dropped(e)) => (e.to_string(), true),
                Err(e) => (e.to_string(), false),
            };
            delay = self.retry_delay(connected, delay);

            tracing::warn!(
                url = %self.url,
                reason = %reason,
                retry_in_ms = delay.as_millis() as u64,
                "Push channel disconnected"
            );

            let event = PushEvent::Disconnected {
                reason,
                retry_in: delay,
            };
            if tx.send(event).await.is_err() {
                return;
            }

            tokio::time::sleep(delay).await;
            delay = self.reconnect.next_delay(delay);
        }
    }

    /// Delay before the next attempt. A session that got as far as
    /// connecting resets the backoff, however it ended.
    fn retry_delay(&self, connected: bool, current: Duration) -> Duration {
        if connected {
            self.reconnect.initial_delay()
        } else {
            current
        }
    }

    /// One connection lifetime. `Err` only when the connection never opened.
    async fn session(&self, tx: &mpsc::Sender<PushEvent>) -> Result<SessionEnd, PushError> {
        let (mut ws, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| PushError::Connect(e.to_string()))?;

        tracing::info!(url = %self.url, "Push channel connected");
        if tx.send(PushEvent::Connected).await.is_err() {
            return Ok(SessionEnd::ReceiverGone);
        }

        while let Some(message) = ws.next().await {
            let text = match message {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(e) => {
                    return Ok(SessionEnd::Dropped(PushError::Transport(e.to_string())));
                }
            };

            match parse_snapshot(&text) {
                Ok(snapshot) => {
                    tracing::debug!(targets = snapshot.len(), "Snapshot received");
                    if tx.send(PushEvent::Snapshot(snapshot)).await.is_err() {
                        return Ok(SessionEnd::ReceiverGone);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring malformed push payload");
                }
            }
        }

        Ok(SessionEnd::Closed)
    }
}

enum SessionEnd {
    /// Server closed the connection after it was established
    Closed,
    /// Connection broke after it was established
    Dropped(PushError),
    /// Dashboard is gone; stop for good
    ReceiverGone,
}
