//! Monitoring server REST API.
//!
//! The dashboard talks to the server through the [`MonitorApi`] trait so the
//! event loop does not care whether requests go over HTTP or to a test double.
//!
//! # Endpoints
//!
//! - `GET /api/websites` - full target list
//! - `POST /api/websites` - start monitoring `{url}`
//! - `DELETE /api/websites` - stop monitoring `{url}`
//! - `GET /api/statistics` - aggregate statistics
//! - `GET /api/export/{json,csv}` - data export downloads

mod client;
mod error;

pub use client::HttpMonitorApi;
pub use error::ApiError;

use crate::snapshot::Snapshot;
use crate::stats::Statistics;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

pub const WEBSITES_PATH: &str = "/api/websites";
pub const STATISTICS_PATH: &str = "/api/statistics";
pub const EXPORT_PATH: &str = "/api/export";

/// Interface to the monitoring server.
///
/// Mutation calls return `()` on success: the client never derives state from
/// their responses. The next pushed snapshot is the source of truth.
#[async_trait]
pub trait MonitorApi: Send + Sync + 'static {
    /// Fetch the full target list once.
    async fn list_targets(&self) -> Result<Snapshot, ApiError>;

    /// Ask the server to start monitoring `url`.
    async fn create_target(&self, url: &str) -> Result<(), ApiError>;

    /// Ask the server to stop monitoring `url`.
    async fn remove_target(&self, url: &str) -> Result<(), ApiError>;

    /// Fetch aggregate statistics.
    async fn fetch_statistics(&self) -> Result<Statistics, ApiError>;

    /// Download an export in the given format.
    async fn export(&self, format: ExportFormat) -> Result<Vec<u8>, ApiError>;

    /// Direct download link for an export.
    fn export_url(&self, format: ExportFormat) -> String;
}

/// Export download format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Invalid export format: {}", s)),
        }
    }
}
