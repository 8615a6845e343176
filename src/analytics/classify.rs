//! Content-type classification for channel messages
//!
//! Every message falls into exactly one bucket: a regular post, an ephemeral
//! story (media with a positive TTL), or a round-video "circle". Anything
//! the rules do not recognize counts as a post; classification fails open
//! and never errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content-type bucket for a single channel message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Post,
    Story,
    Circle,
}

impl ContentType {
    /// All buckets in stable report order.
    pub const ALL: [ContentType; 3] = [ContentType::Post, ContentType::Story, ContentType::Circle];

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Post => "posts",
            ContentType::Story => "stories",
            ContentType::Circle => "circles",
        }
    }
}

/// One channel message, fully typed at the ingestion boundary.
///
/// The collector builds these once from raw Telegram messages; the
/// classifier and accumulator never see partially-populated external
/// objects. Counts are unsigned, so negative values are unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Message id, monotonic per channel.
    pub id: i32,
    /// Time the message was posted.
    pub timestamp: DateTime<Utc>,
    /// Message carries any media payload.
    pub has_media: bool,
    /// Media auto-destruct period in seconds, when present.
    pub media_ttl_seconds: Option<i32>,
    /// Round-video flag from the media descriptor.
    pub is_round_video: bool,
    /// Length of caption/text in characters.
    pub text_length: usize,
    /// View counter; absent for service and some media messages.
    pub view_count: Option<u32>,
    /// Sum of all reaction kinds on the message.
    pub reaction_count: u32,
    /// Forward counter.
    pub forward_count: u32,
}

/// Classify a message into exactly one content-type bucket.
///
/// Priority order: a positive media TTL wins over the round-video flag,
/// so an ephemeral round video still counts as a story.
pub fn classify(message: &MessageRecord) -> ContentType {
    if message.has_media && message.media_ttl_seconds.is_some_and(|ttl| ttl > 0) {
        ContentType::Story
    } else if message.has_media && message.is_round_video {
        ContentType::Circle
    } else {
        ContentType::Post
    }
}
