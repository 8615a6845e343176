//! Report assembly
//!
//! Pure composition of the aggregation outputs into one stable shape for
//! downstream renderers. Nothing is recomputed here, and every per-type
//! counter is present even when zero so renderers need no null handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::accumulate::{TotalsByType, Window};
use super::engagement::EngagementSummary;
use super::growth::GrowthForecast;

/// Complete analytics summary for one channel and one window.
///
/// A caller-owned value object: each aggregation run produces its own
/// instance, nothing is shared between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub channel: String,
    pub period: Window,
    pub generated_at: DateTime<Utc>,
    pub totals: TotalsByType,
    pub engagement: EngagementSummary,
    pub forecast: GrowthForecast,
}

/// Assemble the aggregation outputs into a report summary.
pub fn assemble(
    channel: &str,
    totals: TotalsByType,
    engagement: EngagementSummary,
    forecast: GrowthForecast,
    period: Window,
) -> ReportSummary {
    ReportSummary {
        channel: channel.to_string(),
        period,
        generated_at: Utc::now(),
        totals,
        engagement,
        forecast,
    }
}
