//! Growth forecast command
//!
//! Works entirely from stored snapshots; no Telegram connection needed.

use chrono::{Duration, Utc};

use crate::analytics::growth::{project_growth_with_tolerance, Trend};
use crate::config::Config;
use crate::error::Result;
use crate::snapshots::SnapshotStore;

/// Print a growth forecast for a channel from its snapshot history.
///
/// `days` restricts the history to a trailing window; `None` uses all
/// recorded snapshots.
pub async fn run(channel: &str, days: Option<i64>) -> Result<()> {
    let config = Config::new();
    let store = SnapshotStore::new(&config.snapshot_dir);

    let mut snapshots = store.load(channel)?;
    if let Some(days) = days {
        let cutoff = Utc::now() - Duration::days(days);
        snapshots.retain(|s| s.timestamp >= cutoff);
    }

    let forecast = project_growth_with_tolerance(&snapshots, config.flat_tolerance)?;

    let trend = match forecast.trend {
        Trend::Rising => "Rising",
        Trend::Falling => "Falling",
        Trend::Flat => "Flat",
    };

    println!("Channel: {}", channel);
    println!("Snapshots: {}", snapshots.len());
    if let Some(latest) = snapshots.last() {
        println!(
            "Latest: {} subscribers at {} UTC",
            latest.subscriber_count,
            latest.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
    }
    println!("Trend: {}", trend);
    println!("Average change per period: {:.1}", forecast.average_delta);
    println!(
        "Projected next period: {}",
        forecast.projected_subscribers_next_period
    );

    Ok(())
}
