//! Per-type metrics accumulation over a bounded time window
//!
//! A single linear pass over an ordered message sequence: classify each
//! message, then add its counters to the matching bucket. Views, reactions
//! and forwards are never commingled across buckets; mixing story views
//! into post totals has produced impossible engagement rates before.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classify::{classify, ContentType, MessageRecord};
use crate::error::{Error, Result};

/// Half-open aggregation window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// Create a window, rejecting degenerate ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidWindow(format!(
                "start {} is not before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Trailing window of `days` days ending now.
    pub fn last_days(days: i64) -> Result<Self> {
        let end = Utc::now();
        Self::new(end - chrono::Duration::days(days.max(1)), end)
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

/// Running totals for one content-type bucket.
///
/// Initialized to zero at the start of a run, mutated only while the
/// accumulator consumes the sequence, then read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeTotals {
    pub message_count: u64,
    pub total_views: u64,
    pub total_reactions: u64,
    pub total_forwards: u64,
}

impl ContentTypeTotals {
    fn add(&mut self, message: &MessageRecord) {
        self.message_count += 1;
        // Absent view counters are normal for some message types; count as 0.
        self.total_views += u64::from(message.view_count.unwrap_or(0));
        self.total_reactions += u64::from(message.reaction_count);
        self.total_forwards += u64::from(message.forward_count);
    }
}

/// Accumulated totals for every content type, explicit zeros included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsByType {
    pub posts: ContentTypeTotals,
    pub stories: ContentTypeTotals,
    pub circles: ContentTypeTotals,
}

impl TotalsByType {
    pub fn get(&self, content_type: ContentType) -> &ContentTypeTotals {
        match content_type {
            ContentType::Post => &self.posts,
            ContentType::Story => &self.stories,
            ContentType::Circle => &self.circles,
        }
    }

    fn get_mut(&mut self, content_type: ContentType) -> &mut ContentTypeTotals {
        match content_type {
            ContentType::Post => &mut self.posts,
            ContentType::Story => &mut self.stories,
            ContentType::Circle => &mut self.circles,
        }
    }

    /// Iterate buckets in stable report order.
    pub fn iter(&self) -> impl Iterator<Item = (ContentType, &ContentTypeTotals)> {
        ContentType::ALL.iter().map(move |ct| (*ct, self.get(*ct)))
    }

    pub fn total_messages(&self) -> u64 {
        self.posts.message_count + self.stories.message_count + self.circles.message_count
    }
}

/// Accumulate per-type totals over the messages falling inside `window`.
///
/// The sequence must be time-ordered (ascending or descending is fine, the
/// fetch direction differs between callers); an out-of-order sequence
/// violates the input contract and fails fast. Sparse data such as an empty
/// sequence or messages without views is not an error.
pub fn accumulate(messages: &[MessageRecord], window: &Window) -> Result<TotalsByType> {
    ensure_ordered(messages)?;

    let mut totals = TotalsByType::default();

    for message in messages {
        if !window.contains(message.timestamp) {
            continue;
        }
        totals.get_mut(classify(message)).add(message);
    }

    Ok(totals)
}

fn ensure_ordered(messages: &[MessageRecord]) -> Result<()> {
    let ascending = messages
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp);
    let descending = messages
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp);

    if ascending || descending {
        Ok(())
    } else {
        Err(Error::UnorderedInput(
            "message timestamps are neither ascending nor descending".to_string(),
        ))
    }
}
