//! Channel report command
//!
//! Collects channel history over a window, accumulates per-type totals,
//! computes engagement and a growth forecast, and writes the report to
//! disk as Markdown with optional CSV and JSON exports.

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use crate::analytics::accumulate::{accumulate, Window};
use crate::analytics::engagement::{compute_engagement, SubscriberSource};
use crate::analytics::growth::{project_growth_with_tolerance, ChannelSnapshot};
use crate::analytics::report::assemble;
use crate::channel::{find_channel, peer_name};
use crate::collector::{collect_messages, resolve_subscriber_count};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::export::{write_csv, write_json};
use crate::metrics;
use crate::render::render_markdown;
use crate::session::{get_client, SessionLock};
use crate::snapshots::SnapshotStore;

/// Arguments for the report command
pub struct ReportArgs {
    pub channel: String,
    pub days: Option<i64>,
    pub limit: Option<usize>,
    pub output: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Generate a channel report.
pub async fn run(args: ReportArgs) -> Result<()> {
    let config = Config::new();
    let _lock = SessionLock::acquire()?;
    let client = get_client().await?;

    let peer = find_channel(&client, &config, &args.channel).await?;
    let title = peer_name(&peer);
    info!(channel = %args.channel, title = %title, "resolved channel");

    let days = args.days.unwrap_or(config.window_days);
    let limit = args.limit.unwrap_or(config.message_limit);
    if limit == 0 {
        return Err(Error::InvalidArgument(
            "message limit must be at least 1".to_string(),
        ));
    }
    let window = Window::last_days(days)?;

    let records = collect_messages(&client, &peer, &window, limit).await?;
    metrics::record_messages_collected(&args.channel, records.len() as u64);

    let subscribers = resolve_subscriber_count(&client, &peer).await?;

    let store = SnapshotStore::new(&config.snapshot_dir);
    if subscribers.source != SubscriberSource::Unknown {
        store.append(
            &args.channel,
            ChannelSnapshot {
                timestamp: Utc::now(),
                subscriber_count: subscribers.count,
            },
        )?;
    }

    let totals = accumulate(&records, &window)?;
    let engagement = compute_engagement(&totals, &subscribers);
    if engagement.clamped {
        metrics::record_engagement_clamped(&args.channel);
    }

    let snapshots = store.load(&args.channel)?;
    let forecast = project_growth_with_tolerance(&snapshots, config.flat_tolerance)?;

    let report = assemble(&args.channel, totals, engagement, forecast, window);

    let markdown = render_markdown(&report);
    let output_path = args
        .output
        .unwrap_or_else(|| config.output_dir.join(format!("{}.md", args.channel)));
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output_path, &markdown)?;
    info!(path = %output_path.display(), "report written");

    if let Some(csv_path) = &args.csv {
        write_csv(&report, csv_path)?;
    }
    if let Some(json_path) = &args.json {
        write_json(&report, json_path)?;
    }

    println!("{}", markdown);

    Ok(())
}
