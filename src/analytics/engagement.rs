//! Engagement-rate calculation with sanity clamps
//!
//! The headline ER is computed over the posts bucket only:
//!
//! ```text
//! er = (reactions + forwards) / (subscribers * post_count) * 100
//! ```
//!
//! Story and circle engagement are distinct, separately reported rates
//! and never feed the headline denominator. A raw result above 100%
//! means the subscriber count was stale or undercounted upstream; the
//! value is clamped and the pre-clamp figure kept as a diagnostic.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::accumulate::{ContentTypeTotals, TotalsByType};

/// Where the subscriber count came from, in decreasing order of trust.
///
/// The collector resolves the count through an explicit fallback chain;
/// the calculator only records which rung supplied the value so that a
/// suspicious ER can be traced back to a stale source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriberSource {
    /// Full-channel detail call (`channels.GetFullChannel`).
    FullChannel,
    /// Cached participant count on the channel entity.
    CachedEntity,
    /// No source could supply a value.
    Unknown,
}

impl SubscriberSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullChannel => "full_channel",
            Self::CachedEntity => "cached_entity",
            Self::Unknown => "unknown",
        }
    }
}

/// Best-available subscriber count plus its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberCount {
    pub count: u64,
    pub source: SubscriberSource,
}

impl SubscriberCount {
    pub fn new(count: u64, source: SubscriberSource) -> Self {
        Self { count, source }
    }

    pub fn unknown() -> Self {
        Self {
            count: 0,
            source: SubscriberSource::Unknown,
        }
    }
}

/// Derived engagement metrics, read-only once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementSummary {
    /// Headline ER over the posts bucket, clamped to `[0, 100]`.
    pub engagement_rate: f64,
    /// Pre-clamp ER; above 100 indicates a stale subscriber count.
    pub raw_engagement_rate: f64,
    /// Whether clamping changed the headline value.
    pub clamped: bool,
    /// Story ER, computed against the same subscriber base but reported
    /// separately from the headline figure.
    pub story_engagement_rate: f64,
    /// Circle ER, likewise separate.
    pub circle_engagement_rate: f64,
    pub subscriber_count: u64,
    pub subscriber_source: SubscriberSource,
    /// Per-type breakdown mirroring the accumulator output.
    pub totals: TotalsByType,
}

/// Compute engagement metrics from accumulated totals.
///
/// Zero subscribers or an empty posts bucket define the rate as 0 rather
/// than a division fault; both are data-quality conditions, not errors.
pub fn compute_engagement(totals: &TotalsByType, subscribers: &SubscriberCount) -> EngagementSummary {
    if subscribers.count == 0 {
        warn!(
            source = ?subscribers.source,
            "subscriber count unavailable or zero; engagement defined as 0"
        );
    }

    let raw = bucket_rate(&totals.posts, subscribers.count);
    let clamped = !(0.0..=100.0).contains(&raw);
    if raw > 100.0 {
        warn!(
            raw_engagement_rate = raw,
            subscriber_count = subscribers.count,
            source = ?subscribers.source,
            "engagement rate above 100%; subscriber count is likely stale"
        );
    }

    EngagementSummary {
        engagement_rate: raw.clamp(0.0, 100.0),
        raw_engagement_rate: raw,
        clamped,
        story_engagement_rate: bucket_rate(&totals.stories, subscribers.count).clamp(0.0, 100.0),
        circle_engagement_rate: bucket_rate(&totals.circles, subscribers.count).clamp(0.0, 100.0),
        subscriber_count: subscribers.count,
        subscriber_source: subscribers.source,
        totals: *totals,
    }
}

fn bucket_rate(bucket: &ContentTypeTotals, subscribers: u64) -> f64 {
    if subscribers == 0 || bucket.message_count == 0 {
        return 0.0;
    }

    let interactions = (bucket.total_reactions + bucket.total_forwards) as f64;
    let reach = (subscribers * bucket.message_count) as f64;
    interactions / reach * 100.0
}
