//! Error types for the push channel.

use thiserror::Error;

/// Reasons a push connection ended or a payload was rejected.
#[derive(Debug, Clone, Error)]
pub enum PushError {
    /// Could not open the WebSocket
    #[error("connection failed: {0}")]
    Connect(String),

    /// Connection broke mid-stream
    #[error("transport error: {0}")]
    Transport(String),

    /// Server closed the connection
    #[error("connection closed by server")]
    Closed,

    /// Payload was not a snapshot
    #[error("malformed payload: {0}")]
    Protocol(String),
}
