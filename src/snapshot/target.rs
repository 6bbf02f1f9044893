use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{timestamp, wire};

/// Probe status reported by the monitoring server.
///
/// The wire form is free text. Known shapes are parsed into variants so the
/// client can reason about them; anything else is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetStatus {
    /// Not yet checked
    #[default]
    Unknown,
    /// Reachable, no further detail
    Up,
    /// Request failed before any HTTP response
    Down,
    /// Unexpected probe failure
    Error,
    /// Successful response (2xx/3xx), e.g. "200 OK"
    Ok(u16),
    /// Error response, e.g. "HTTP 503"
    Http(u16),
    /// Any status text the client does not recognize
    Other(String),
}

impl From<String> for TargetStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "UNKNOWN" => return TargetStatus::Unknown,
            "UP" => return TargetStatus::Up,
            "DOWN" => return TargetStatus::Down,
            "ERROR" => return TargetStatus::Error,
            _ => {}
        }

        if let Some(code) = raw.strip_suffix(" OK").and_then(canonical_code) {
            return TargetStatus::Ok(code);
        }
        if let Some(code) = raw.strip_prefix("HTTP ").and_then(canonical_code) {
            return TargetStatus::Http(code);
        }

        TargetStatus::Other(raw)
    }
}

/// Parse a status code only when it prints back exactly as written, so the
/// displayed status always matches the wire text ("0200" and "+503" stay verbatim).
fn canonical_code(digits: &str) -> Option<u16> {
    digits
        .parse::<u16>()
        .ok()
        .filter(|code| code.to_string() == digits)
}

impl From<TargetStatus> for String {
    fn from(status: TargetStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetStatus::Unknown => f.write_str("UNKNOWN"),
            TargetStatus::Up => f.write_str("UP"),
            TargetStatus::Down => f.write_str("DOWN"),
            TargetStatus::Error => f.write_str("ERROR"),
            TargetStatus::Ok(code) => write!(f, "{} OK", code),
            TargetStatus::Http(code) => write!(f, "HTTP {}", code),
            TargetStatus::Other(text) => f.write_str(text),
        }
    }
}

/// One entry in a target's status-transition log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEvent {
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub old_status: TargetStatus,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub new_status: TargetStatus,
}

/// A website tracked by the monitoring server.
///
/// Records are always replaced wholesale by the next snapshot; nothing in the
/// client mutates one field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoredTarget {
    /// Primary key for rendering and mutation addressing
    pub url: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub status: TargetStatus,
    /// Authoritative up/down flag, independent of the status text
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub is_up: bool,
    /// Last response time; zero means not yet measured
    #[serde(
        default,
        rename = "response_time",
        alias = "response_time_ms",
        deserialize_with = "wire::null_as_default"
    )]
    pub response_time_ms: f64,
    #[serde(
        default,
        rename = "avg_response_time",
        alias = "avg_response_time_ms",
        deserialize_with = "wire::null_as_default"
    )]
    pub avg_response_time_ms: f64,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub last_checked: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub uptime_percentage: f64,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub total_checks: u64,
    /// Transition log, in whatever order the server sends it
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub status_history: Vec<StatusHistoryEvent>,
}

impl MonitoredTarget {
    /// Create a target in its pre-first-check state.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: TargetStatus::Unknown,
            is_up: false,
            response_time_ms: 0.0,
            avg_response_time_ms: 0.0,
            last_checked: None,
            uptime_percentage: 0.0,
            total_checks: 0,
            status_history: Vec::new(),
        }
    }

    /// Whether the target's url or status text contains an already-lowercased needle.
    pub fn matches(&self, needle: &str) -> bool {
        self.url.to_lowercase().contains(needle)
            || self.status.to_string().to_lowercase().contains(needle)
    }
}
