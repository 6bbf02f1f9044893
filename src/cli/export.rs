//! Export command implementation

use crate::api::MonitorApi;
use crate::cli::ExportArgs;
use std::fs;
use std::io::Write;

/// Handle `sitewatch export`
///
/// Writes the download to `--output` when given, otherwise to `out`. Returns
/// a status message for the file case.
pub async fn handle_export(
    args: &ExportArgs,
    api: &dyn MonitorApi,
    out: &mut dyn Write,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    tracing::debug!(url = %api.export_url(args.format), "Downloading export");
    let body = api.export(args.format).await?;

    match &args.output {
        Some(path) => {
            fs::write(path, &body)?;
            Ok(Some(format!(
                "✓ Exported {} bytes of {} to {}",
                body.len(),
                args.format.to_string().to_uppercase(),
                path.display()
            )))
        }
        None => {
            out.write_all(&body)?;
            out.flush()?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ExportFormat};
    use crate::snapshot::Snapshot;
    use crate::stats::Statistics;
    use async_trait::async_trait;

    struct CsvExport;

    #[async_trait]
    impl MonitorApi for CsvExport {
        async fn list_targets(&self) -> Result<Snapshot, ApiError> {
            Ok(Snapshot::default())
        }

        async fn create_target(&self, _url: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn remove_target(&self, _url: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn fetch_statistics(&self) -> Result<Statistics, ApiError> {
            Ok(Statistics::default())
        }

        async fn export(&self, format: ExportFormat) -> Result<Vec<u8>, ApiError> {
            match format {
                ExportFormat::Csv => Ok(b"url,status\nhttps://a.test,UP\n".to_vec()),
                ExportFormat::Json => Err(ApiError::Rejected {
                    status: 500,
                    detail: None,
                }),
            }
        }

        fn export_url(&self, format: ExportFormat) -> String {
            format!("http://server.test/api/export/{}", format)
        }
    }

    #[tokio::test]
    async fn test_export_to_stdout() {
        let args = ExportArgs {
            format: ExportFormat::Csv,
            output: None,
        };
        let mut out = Vec::new();
        let message = handle_export(&args, &CsvExport, &mut out).await.unwrap();

        assert!(message.is_none());
        assert_eq!(out, b"url,status\nhttps://a.test,UP\n");
    }

    #[tokio::test]
    async fn test_export_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sites.csv");
        let args = ExportArgs {
            format: ExportFormat::Csv,
            output: Some(path.clone()),
        };
        let mut out = Vec::new();
        let message = handle_export(&args, &CsvExport, &mut out)
            .await
            .unwrap()
            .unwrap();

        assert!(message.contains("sites.csv"));
        assert!(out.is_empty());
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("url,status"));
    }

    #[tokio::test]
    async fn test_export_failure_propagates() {
        let args = ExportArgs {
            format: ExportFormat::Json,
            output: None,
        };
        let mut out = Vec::new();
        assert!(handle_export(&args, &CsvExport, &mut out).await.is_err());
    }
}
