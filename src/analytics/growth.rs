//! Subscriber growth trend and short-horizon projection
//!
//! Works over an ordered series of subscriber-count snapshots: the trend
//! is the sign of the average period-over-period delta (with a small
//! tolerance band treated as flat), and the next-period projection is a
//! linear extrapolation of that average, clamped at zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Average delta magnitudes at or below this count as a flat trend.
pub const FLAT_TOLERANCE: f64 = 0.5;

/// Subscriber count sample at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    pub timestamp: DateTime<Utc>,
    pub subscriber_count: u64,
}

/// Direction of the subscriber trend over the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

/// Derived growth forecast, read-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthForecast {
    pub trend: Trend,
    /// Linear extrapolation of the trailing average delta, never negative.
    pub projected_subscribers_next_period: u64,
    /// Average period-over-period delta the forecast is based on.
    pub average_delta: f64,
}

/// Project the next-period subscriber count from ordered snapshots.
///
/// Fewer than two snapshots carry no trend information: the result is flat
/// with the last known value (or 0 with no snapshots at all). Unordered
/// timestamps violate the input contract and fail fast.
pub fn project_growth(snapshots: &[ChannelSnapshot]) -> Result<GrowthForecast> {
    project_growth_with_tolerance(snapshots, FLAT_TOLERANCE)
}

/// Same as [`project_growth`] with an explicit flat-band tolerance.
pub fn project_growth_with_tolerance(
    snapshots: &[ChannelSnapshot],
    tolerance: f64,
) -> Result<GrowthForecast> {
    if snapshots
        .windows(2)
        .any(|pair| pair[0].timestamp > pair[1].timestamp)
    {
        return Err(Error::UnorderedInput(
            "snapshot timestamps must be non-decreasing".to_string(),
        ));
    }

    if snapshots.len() < 2 {
        return Ok(GrowthForecast {
            trend: Trend::Flat,
            projected_subscribers_next_period: snapshots.last().map_or(0, |s| s.subscriber_count),
            average_delta: 0.0,
        });
    }

    let deltas: Vec<f64> = snapshots
        .windows(2)
        .map(|pair| pair[1].subscriber_count as f64 - pair[0].subscriber_count as f64)
        .collect();
    let average_delta = deltas.iter().sum::<f64>() / deltas.len() as f64;

    let trend = if average_delta > tolerance {
        Trend::Rising
    } else if average_delta < -tolerance {
        Trend::Falling
    } else {
        Trend::Flat
    };

    let last = snapshots[snapshots.len() - 1].subscriber_count as f64;
    let projected = (last + average_delta).max(0.0).round() as u64;

    Ok(GrowthForecast {
        trend,
        projected_subscribers_next_period: projected,
        average_delta,
    })
}
