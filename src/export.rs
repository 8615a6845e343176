//! CSV and JSON export of report summaries

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::analytics::classify::ContentType;
use crate::analytics::report::ReportSummary;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    channel: &'a str,
    content_type: &'a str,
    messages: u64,
    views: u64,
    reactions: u64,
    forwards: u64,
}

/// Write the per-type breakdown of a report as CSV, one row per content type.
pub fn write_csv(report: &ReportSummary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;

    for content_type in ContentType::ALL {
        let totals = report.totals.get(content_type);
        writer.serialize(CsvRow {
            channel: &report.channel,
            content_type: content_type.label(),
            messages: totals.message_count,
            views: totals.total_views,
            reactions: totals.total_reactions,
            forwards: totals.total_forwards,
        })?;
    }

    writer.flush()?;
    info!(path = %path.display(), "CSV export written");
    Ok(())
}

/// Write the full report as pretty-printed JSON.
pub fn write_json(report: &ReportSummary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let data = serde_json::to_string_pretty(report)?;
    fs::write(path, data)?;
    info!(path = %path.display(), "JSON export written");
    Ok(())
}
