//! Stats command implementation

use crate::api::MonitorApi;
use crate::cli::output::{format_statistics_json, format_statistics_table};
use crate::cli::StatsArgs;
use crate::stats::StatisticsPanel;

/// Handle `sitewatch stats`
pub async fn handle_stats(
    args: &StatsArgs,
    api: &dyn MonitorApi,
) -> Result<String, Box<dyn std::error::Error>> {
    let stats = api
        .fetch_statistics()
        .await
        .map_err(|e| format!("Failed to load statistics: {}", e))?;

    if args.json {
        return Ok(format_statistics_json(&stats)?);
    }
    Ok(format_statistics_table(&StatisticsPanel::from(&stats)))
}
