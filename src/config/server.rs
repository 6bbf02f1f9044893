//! Monitoring server connection configuration

use serde::{Deserialize, Serialize};

/// Where the monitoring server lives and how to talk to it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP base URL of the monitoring server
    pub base_url: String,
    /// Path of the snapshot push WebSocket
    pub websocket_path: String,
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            websocket_path: "/ws".to_string(),
            request_timeout_seconds: 10,
        }
    }
}

impl ServerConfig {
    /// WebSocket URL derived from the HTTP base URL (`http` -> `ws`, `https` -> `wss`).
    pub fn websocket_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            base.to_string()
        };
        format!("{}{}", ws_base, self.websocket_path)
    }
}
