//! Channel analytics core
//!
//! Provides:
//! - Content-type classification (post / story / circle)
//! - Per-type metrics accumulation over a bounded window
//! - Engagement-rate calculation with sanity clamps
//! - Subscriber growth projection
//! - Report assembly for downstream renderers
//!
//! The core is synchronous and allocation-local per run: it performs no
//! I/O, and independent runs share no mutable state.

pub mod accumulate;
pub mod classify;
pub mod engagement;
pub mod growth;
pub mod report;

pub use accumulate::{accumulate, ContentTypeTotals, TotalsByType, Window};
pub use classify::{classify, ContentType, MessageRecord};
pub use engagement::{compute_engagement, EngagementSummary, SubscriberCount, SubscriberSource};
pub use growth::{project_growth, ChannelSnapshot, GrowthForecast, Trend};
pub use report::{assemble, ReportSummary};
