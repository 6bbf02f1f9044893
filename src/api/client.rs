//! HTTP implementation of [`MonitorApi`].

use super::{ApiError, ExportFormat, MonitorApi, EXPORT_PATH, STATISTICS_PATH, WEBSITES_PATH};
use crate::config::ServerConfig;
use crate::snapshot::Snapshot;
use crate::stats::Statistics;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

/// Request body for create/remove.
#[derive(Serialize)]
struct TargetRequest<'a> {
    url: &'a str,
}

/// Monitoring server client backed by `reqwest`.
pub struct HttpMonitorApi {
    /// Base URL without trailing slash (e.g., "http://127.0.0.1:8000")
    base_url: String,
    /// Shared HTTP client for connection pooling
    client: Client,
    timeout_seconds: u64,
}

impl HttpMonitorApi {
    /// Build a client from server configuration.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self::with_client(
            &config.base_url,
            client,
            config.request_timeout_seconds,
        ))
    }

    /// Create a client with a custom HTTP client (for testing).
    pub fn with_client(base_url: &str, client: Client, timeout_seconds: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_seconds,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into `ApiError::Rejected`, keeping the
    /// server's `detail` string when it sent one.
    async fn rejection(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail")?.as_str().map(str::to_string));
        ApiError::Rejected { status, detail }
    }

    async fn checked(&self, response: Result<Response, reqwest::Error>) -> Result<Response, ApiError> {
        let response = response.map_err(|e| ApiError::from_reqwest(e, self.timeout_seconds))?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(response)
    }
}

#[async_trait]
impl MonitorApi for HttpMonitorApi {
    async fn list_targets(&self) -> Result<Snapshot, ApiError> {
        let response = self
            .checked(self.client.get(self.endpoint(WEBSITES_PATH)).send().await)
            .await?;

        response.json::<Snapshot>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse website list: {}", e))
        })
    }

    async fn create_target(&self, url: &str) -> Result<(), ApiError> {
        self.checked(
            self.client
                .post(self.endpoint(WEBSITES_PATH))
                .json(&TargetRequest { url })
                .send()
                .await,
        )
        .await?;

        tracing::info!(url = %url, "Create request accepted");
        Ok(())
    }

    async fn remove_target(&self, url: &str) -> Result<(), ApiError> {
        self.checked(
            self.client
                .delete(self.endpoint(WEBSITES_PATH))
                .json(&TargetRequest { url })
                .send()
                .await,
        )
        .await?;

        tracing::info!(url = %url, "Remove request accepted");
        Ok(())
    }

    async fn fetch_statistics(&self) -> Result<Statistics, ApiError> {
        let response = self
            .checked(self.client.get(self.endpoint(STATISTICS_PATH)).send().await)
            .await?;

        response.json::<Statistics>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse statistics: {}", e))
        })
    }

    async fn export(&self, format: ExportFormat) -> Result<Vec<u8>, ApiError> {
        let response = self
            .checked(self.client.get(self.export_url(format)).send().await)
            .await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read export: {}", e)))?;
        Ok(body.to_vec())
    }

    fn export_url(&self, format: ExportFormat) -> String {
        format!("{}{}/{}", self.base_url, EXPORT_PATH, format.extension())
    }
}
