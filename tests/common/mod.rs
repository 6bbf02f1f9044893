//! Shared test utilities for sitewatch integration tests.
//!
//! Provides wire-format builders, an HTTP client pointed at a mock server,
//! a recording dashboard surface and a small WebSocket push server.

#![allow(dead_code)]

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use sitewatch::api::HttpMonitorApi;
use sitewatch::config::ReconnectConfig;
use sitewatch::dashboard::{Notice, Screen, Surface};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use wiremock::MockServer;

// =============================================================================
// Wire Builders
// =============================================================================

/// One monitored target as the server sends it.
pub fn target_json(url: &str, status: &str, is_up: bool) -> Value {
    json!({
        "url": url,
        "status": status,
        "is_up": is_up,
        "response_time": 120.0,
        "avg_response_time": 95.5,
        "last_checked": "2024-05-01T10:00:00",
        "uptime_percentage": 99.2,
        "total_checks": 42,
        "status_history": []
    })
}

/// Snapshot payload (JSON array) for the push channel.
pub fn snapshot_payload(targets: &[Value]) -> String {
    Value::Array(targets.to_vec()).to_string()
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Client talking to a wiremock server.
pub fn api_for(server: &MockServer) -> HttpMonitorApi {
    HttpMonitorApi::with_client(&server.uri(), reqwest::Client::new(), 5)
}

/// Reconnect schedule short enough for tests.
pub fn fast_reconnect() -> ReconnectConfig {
    ReconnectConfig {
        initial_delay_ms: 10,
        max_delay_seconds: 1,
    }
}

// =============================================================================
// Surfaces
// =============================================================================

/// Everything the dashboard showed, in order.
#[derive(Debug, Clone)]
pub enum Shown {
    Screen(Screen),
    Notice(Notice),
}

/// Surface forwarding every draw and notice over a channel.
pub struct ChannelSurface {
    tx: mpsc::UnboundedSender<Shown>,
}

impl ChannelSurface {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Shown>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Surface for ChannelSurface {
    fn draw(&mut self, screen: &Screen) {
        let _ = self.tx.send(Shown::Screen(screen.clone()));
    }

    fn notify(&mut self, notice: &Notice) {
        let _ = self.tx.send(Shown::Notice(notice.clone()));
    }
}

/// Surface that keeps everything in memory.
#[derive(Default)]
pub struct RecordingSurface {
    pub screens: Vec<Screen>,
    pub notices: Vec<Notice>,
}

impl RecordingSurface {
    pub fn last_screen(&self) -> &Screen {
        self.screens.last().expect("at least the initial draw")
    }
}

impl Surface for RecordingSurface {
    fn draw(&mut self, screen: &Screen) {
        self.screens.push(screen.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

// =============================================================================
// Push Server
// =============================================================================

/// WebSocket server that sends `messages` to every client, then closes.
pub struct PushServer {
    pub url: String,
    connections: Arc<AtomicUsize>,
}

impl PushServer {
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct PushServerState {
    messages: Arc<Vec<String>>,
    connections: Arc<AtomicUsize>,
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<PushServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_socket(socket, state))
}

async fn serve_socket(mut socket: WebSocket, state: PushServerState) {
    state.connections.fetch_add(1, Ordering::SeqCst);
    for message in state.messages.iter() {
        if socket.send(Message::Text(message.clone())).await.is_err() {
            return;
        }
    }
    let _ = socket.send(Message::Close(None)).await;
}

/// Start a push server on an ephemeral port.
pub async fn start_push_server(messages: Vec<String>) -> PushServer {
    let connections = Arc::new(AtomicUsize::new(0));
    let state = PushServerState {
        messages: Arc::new(messages),
        connections: connections.clone(),
    };
    let app = Router::new().route("/ws", get(ws_handler)).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    PushServer {
        url: format!("ws://{}/ws", addr),
        connections,
    }
}
