//! Aggregate statistics fetched alongside each snapshot.
//!
//! Statistics come from their own request/response cycle and are only
//! eventually consistent with the displayed snapshot.

use crate::snapshot::wire::null_as_default;
use serde::{Deserialize, Serialize};

/// Aggregate record returned by the statistics endpoint.
///
/// Every field is optional on the wire; missing or null means zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    #[serde(deserialize_with = "null_as_default")]
    pub total_websites: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub websites_up: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub websites_down: u64,
    /// Mean uptime percentage across all targets
    #[serde(deserialize_with = "null_as_default")]
    pub average_uptime: f64,
    /// Mean response time in milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub average_response_time: f64,
}

/// Display-ready statistics, one string per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsPanel {
    pub total_websites: String,
    pub websites_up: String,
    pub websites_down: String,
    pub average_uptime: String,
    pub average_response_time: String,
}

impl From<&Statistics> for StatisticsPanel {
    fn from(stats: &Statistics) -> Self {
        Self {
            total_websites: stats.total_websites.to_string(),
            websites_up: stats.websites_up.to_string(),
            websites_down: stats.websites_down.to_string(),
            average_uptime: format!("{:.1}%", stats.average_uptime),
            average_response_time: format!(
                "{}ms",
                stats.average_response_time.max(0.0).round() as u64
            ),
        }
    }
}
