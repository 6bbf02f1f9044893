//! List/add/remove command implementations

use crate::api::MonitorApi;
use crate::cli::output::{format_frame_table, format_targets_json};
use crate::cli::{AddArgs, ListArgs, RemoveArgs};
use crate::filter::{filter, FilterTerm};
use crate::mutation::{validate_target_url, RemovalGuard, ADD_FAILED, REMOVE_FAILED};
use crate::render::render;
use std::io::{BufRead, Write};

/// Handle `sitewatch list`
pub async fn handle_list(
    args: &ListArgs,
    api: &dyn MonitorApi,
) -> Result<String, Box<dyn std::error::Error>> {
    let snapshot = api.list_targets().await?;
    let term = FilterTerm::new(args.search.as_deref().unwrap_or_default());
    let view = filter(&snapshot, &term);

    if args.json {
        return Ok(format_targets_json(&view)?);
    }
    Ok(format_frame_table(&render(&view, &term, true)))
}

/// Handle `sitewatch add <url>`
///
/// Invalid input never reaches the server.
pub async fn handle_add(
    args: &AddArgs,
    api: &dyn MonitorApi,
) -> Result<String, Box<dyn std::error::Error>> {
    let url = validate_target_url(&args.url)?;

    api.create_target(&url).await.map_err(|e| {
        tracing::debug!(url = %url, error = %e, "Create request failed");
        e.user_message(ADD_FAILED)
    })?;

    Ok(format!(
        "✓ Now monitoring {}. It will appear with the next update.",
        url
    ))
}

/// Handle `sitewatch remove <url>`
///
/// Asks for confirmation through `confirm` unless `--yes` was given.
pub async fn handle_remove<F>(
    args: &RemoveArgs,
    api: &dyn MonitorApi,
    confirm: F,
) -> Result<String, Box<dyn std::error::Error>>
where
    F: FnOnce(&str) -> std::io::Result<bool>,
{
    let url = args.url.trim();
    if url.is_empty() {
        return Err("Website URL must not be empty".into());
    }

    let mut guard = RemovalGuard::default();
    guard.request(url);
    let confirmed = args.yes || confirm(url)?;

    let Some(url) = guard.resolve(confirmed) else {
        return Ok("Removal cancelled".to_string());
    };

    api.remove_target(&url).await.map_err(|e| {
        tracing::debug!(url = %url, error = %e, "Delete request failed");
        REMOVE_FAILED
    })?;

    Ok(format!("✓ Stopped monitoring {}", url))
}

/// Ask on stdin/stderr whether to remove `url`.
pub fn prompt_confirmation(url: &str) -> std::io::Result<bool> {
    let mut stderr = std::io::stderr();
    write!(stderr, "Stop monitoring {}? [y/N] ", url)?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
