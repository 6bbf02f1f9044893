//! Error types for server API requests.

use thiserror::Error;

/// Errors that can occur when talking to the monitoring server.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Server answered with a non-success status.
    #[error("server rejected request ({status}){}", detail_suffix(.detail))]
    Rejected { status: u16, detail: Option<String> },

    /// Connection could not be established or was interrupted.
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout.
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Response body did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP client could not be constructed.
    #[error("client configuration error: {0}")]
    Configuration(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

impl ApiError {
    /// Classify a reqwest error.
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_seconds: u64) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(timeout_seconds)
        } else {
            ApiError::Network(e.to_string())
        }
    }

    /// Server-provided detail message, if the server sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                detail: Some(detail),
                ..
            } => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Message for the user: the server's detail verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}
