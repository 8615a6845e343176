//! Telegram Channel Analytics Library
//!
//! This library provides tools to:
//! - Collect channel history and classify content (posts, stories, circles)
//! - Accumulate per-type view, reaction, and forward totals
//! - Compute engagement rates with sanity clamps
//! - Track subscriber snapshots and project growth
//! - Assemble reports and export them as Markdown, CSV, or JSON

pub mod analytics;
pub mod channel;
pub mod collector;
pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod render;
pub mod session;
pub mod snapshots;

// Re-export common types
pub use analytics::accumulate::{accumulate, ContentTypeTotals, TotalsByType, Window};
pub use analytics::classify::{classify, ContentType, MessageRecord};
pub use analytics::engagement::{
    compute_engagement, EngagementSummary, SubscriberCount, SubscriberSource,
};
pub use analytics::growth::{project_growth, ChannelSnapshot, GrowthForecast, Trend};
pub use analytics::report::{assemble, ReportSummary};
pub use config::{ChannelEntity, Config};
pub use error::{Error, Result};
pub use session::{check_session_exists, get_client, SessionLock};
pub use snapshots::SnapshotStore;

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
