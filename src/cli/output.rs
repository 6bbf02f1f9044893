//! Output formatting helpers for CLI commands

use crate::dashboard::{ConnectionState, Notice, Screen};
use crate::history::{HistoryContent, HistoryPanel, EMPTY_HISTORY_MESSAGE};
use crate::render::{Frame, Row};
use crate::snapshot::MonitoredTarget;
use crate::stats::{Statistics, StatisticsPanel};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;
use std::fmt::Write;

fn status_cell(row: &Row) -> String {
    if row.is_up {
        row.status.green().to_string()
    } else {
        row.status.red().to_string()
    }
}

/// Format a rendered frame as a table, or its empty-state message.
pub fn format_frame_table(frame: &Frame) -> String {
    if let Some(empty) = &frame.empty {
        return empty.message().dimmed().to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "#",
        "URL",
        "Status",
        "Response",
        "Avg Response",
        "Last Checked",
        "Uptime",
    ]);

    for row in &frame.rows {
        table.add_row(vec![
            Cell::new(row.index),
            Cell::new(&row.url),
            Cell::new(status_cell(row)),
            Cell::new(&row.response_time),
            Cell::new(&row.avg_response_time),
            Cell::new(&row.last_checked),
            Cell::new(format!("{} ({})", row.uptime, row.uptime_detail)),
        ]);
    }

    table.to_string()
}

/// Format the statistics panel as a single summary line.
pub fn format_statistics(panel: &StatisticsPanel) -> String {
    format!(
        "Websites: {}  Up: {}  Down: {}  Avg uptime: {}  Avg response: {}",
        panel.total_websites.bold(),
        panel.websites_up.green(),
        panel.websites_down.red(),
        panel.average_uptime,
        panel.average_response_time
    )
}

/// Format statistics as a two-column table
pub fn format_statistics_table(panel: &StatisticsPanel) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Total websites", panel.total_websites.as_str()]);
    table.add_row(vec!["Up", panel.websites_up.as_str()]);
    table.add_row(vec!["Down", panel.websites_down.as_str()]);
    table.add_row(vec!["Average uptime", panel.average_uptime.as_str()]);
    table.add_row(vec![
        "Average response time",
        panel.average_response_time.as_str(),
    ]);
    table.to_string()
}

/// Format statistics as JSON
pub fn format_statistics_json(stats: &Statistics) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(stats)
}

/// Format targets as JSON
pub fn format_targets_json(targets: &[&MonitoredTarget]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "websites": targets
    }))
}

/// Format the open history panel
pub fn format_history(panel: &HistoryPanel) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{} {}", "History:".bold(), panel.url);

    match &panel.content {
        HistoryContent::Empty => {
            let _ = writeln!(output, "  {}", EMPTY_HISTORY_MESSAGE.dimmed());
        }
        HistoryContent::Entries(lines) => {
            for line in lines {
                let _ = writeln!(output, "  {}  {}", line.timestamp, line.transition);
            }
        }
    }
    let _ = write!(output, "  {}", "(type `close` to go back)".dimmed());

    output
}

/// Connection indicator for the dashboard header
pub fn format_connection(state: &ConnectionState) -> String {
    match state {
        ConnectionState::Connecting => "● connecting".yellow().to_string(),
        ConnectionState::Live => "● live".green().to_string(),
        ConnectionState::Stale { reason, retry_in } => format!(
            "{} ({}; retrying in {}s)",
            "● stale".red(),
            reason,
            retry_in.as_secs_f64().ceil() as u64
        ),
    }
}

/// Format a user-facing notice
pub fn format_notice(notice: &Notice) -> String {
    match notice {
        Notice::Validation(_) => format!("⚠ {}", notice).yellow().to_string(),
        Notice::RequestFailed(_) => format!("✗ {}", notice).red().to_string(),
        Notice::ConfirmRemoval { .. } => format!("? {}", notice).cyan().to_string(),
        Notice::Info(_) => notice.to_string(),
    }
}

/// Format the whole live dashboard screen
pub fn format_screen(screen: &Screen, server: &str) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "{} {}  {}",
        "sitewatch".bold(),
        server,
        format_connection(&screen.connection)
    );

    match &screen.statistics {
        Some(panel) => {
            let _ = writeln!(output, "{}", format_statistics(panel));
        }
        None => {
            let _ = writeln!(output, "{}", "Statistics: loading...".dimmed());
        }
    }

    if !screen.filter_term.is_empty() {
        let _ = writeln!(output, "Search: {}", screen.filter_term.cyan());
    }
    let _ = writeln!(output);

    match &screen.history {
        Some(panel) => {
            let _ = writeln!(output, "{}", format_history(panel));
        }
        None => {
            let _ = writeln!(output, "{}", format_frame_table(&screen.frame));
        }
    }

    if !screen.add_input.is_empty() {
        let _ = writeln!(output, "Adding: {}", screen.add_input);
    }
    if let Some(url) = &screen.pending_removal {
        let _ = writeln!(
            output,
            "{}",
            format_notice(&Notice::ConfirmRemoval { url: url.clone() })
        );
    }

    let _ = write!(output, "{}", "Type `help` for commands".dimmed());
    output
}
