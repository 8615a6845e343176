//! Message ingestion from Telegram history
//!
//! Walks a channel's history over a reporting window and lowers raw TL
//! messages into [`MessageRecord`]s the analytics layer understands.
//! Service messages (joins, pins, and similar) carry no view data and
//! are skipped.

use grammers_client::types::peer::Peer;
use grammers_client::Client;
use grammers_tl_types as tl;
use tracing::{debug, info, warn};

use crate::analytics::accumulate::Window;
use crate::analytics::classify::MessageRecord;
use crate::analytics::engagement::{SubscriberCount, SubscriberSource};
use crate::error::{Error, Result};

/// Media facts relevant to classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaProbe {
    pub has_media: bool,
    pub ttl_seconds: Option<i32>,
    pub is_round_video: bool,
}

/// Inspect a message's media for self-destruct TTL and round-video flags.
pub fn probe_media(media: Option<&tl::enums::MessageMedia>) -> MediaProbe {
    let Some(media) = media else {
        return MediaProbe::default();
    };

    match media {
        tl::enums::MessageMedia::Photo(photo) => MediaProbe {
            has_media: true,
            ttl_seconds: photo.ttl_seconds,
            is_round_video: false,
        },
        tl::enums::MessageMedia::Document(doc) => MediaProbe {
            has_media: true,
            ttl_seconds: doc.ttl_seconds,
            is_round_video: doc.round,
        },
        _ => MediaProbe {
            has_media: true,
            ttl_seconds: None,
            is_round_video: false,
        },
    }
}

/// Sum reaction counts across all reaction kinds on a message.
pub fn total_reactions(reactions: Option<&tl::enums::MessageReactions>) -> u32 {
    let Some(reactions) = reactions else {
        return 0;
    };

    let tl::enums::MessageReactions::Reactions(reactions) = reactions;

    let mut total: u32 = 0;
    for result in &reactions.results {
        let tl::enums::ReactionCount::Count(count) = result;
        total += saturate_count(count.count);
    }

    total
}

/// Clamp a raw TL counter to zero; negative values are wire noise.
pub fn saturate_count(raw: i32) -> u32 {
    raw.max(0) as u32
}

/// Collect messages from a channel over a window, newest first.
///
/// Stops early once history crosses below the window start, so `limit`
/// caps work rather than the window itself.
pub async fn collect_messages(
    client: &Client,
    peer: &Peer,
    window: &Window,
    limit: usize,
) -> Result<Vec<MessageRecord>> {
    let mut records = Vec::new();
    let mut scanned = 0usize;
    let mut messages = client.iter_messages(peer);

    while let Some(msg) = messages
        .next()
        .await
        .map_err(|e| Error::TelegramError(e.to_string()))?
    {
        scanned += 1;
        if scanned > limit {
            warn!(limit, "message limit reached before window start");
            break;
        }

        let date = msg.date();
        if date >= window.end {
            continue;
        }
        if date < window.start {
            // History iterates newest first; everything past here is older.
            break;
        }

        let tl::enums::Message::Message(raw) = &msg.raw else {
            debug!(id = msg.id(), "skipping service message");
            continue;
        };

        let probe = probe_media(raw.media.as_ref());
        records.push(MessageRecord {
            id: msg.id(),
            timestamp: date,
            has_media: probe.has_media,
            media_ttl_seconds: probe.ttl_seconds,
            is_round_video: probe.is_round_video,
            text_length: msg.text().chars().count(),
            view_count: raw.views.map(saturate_count),
            reaction_count: total_reactions(raw.reactions.as_ref()),
            forward_count: raw.forwards.map(saturate_count).unwrap_or(0),
        });
    }

    info!(
        collected = records.len(),
        scanned, "collected channel history"
    );

    Ok(records)
}

/// Resolve the subscriber count for a channel peer.
///
/// Prefers the authoritative `channels.GetFullChannel` response and
/// falls back to the count cached on the dialog entity. Both can be
/// absent for channels that hide member counts.
pub async fn resolve_subscriber_count(client: &Client, peer: &Peer) -> Result<SubscriberCount> {
    let Peer::Channel(channel) = peer else {
        return Ok(SubscriberCount::unknown());
    };

    let input = tl::enums::InputChannel::Channel(tl::types::InputChannel {
        channel_id: channel.raw.id,
        access_hash: channel.raw.access_hash.unwrap_or(0),
    });

    match client
        .invoke(&tl::functions::channels::GetFullChannel { channel: input })
        .await
    {
        Ok(tl::enums::messages::ChatFull::Full(full)) => {
            if let tl::enums::ChatFull::ChannelFull(cf) = &full.full_chat {
                if let Some(count) = cf.participants_count {
                    debug!(count, "subscriber count from full channel info");
                    return Ok(SubscriberCount::new(
                        saturate_count(count) as u64,
                        SubscriberSource::FullChannel,
                    ));
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "GetFullChannel failed, falling back to cached entity");
        }
    }

    if let Some(count) = channel.raw.participants_count {
        debug!(count, "subscriber count from cached entity");
        return Ok(SubscriberCount::new(
            saturate_count(count) as u64,
            SubscriberSource::CachedEntity,
        ));
    }

    warn!("subscriber count unavailable for channel");
    Ok(SubscriberCount::unknown())
}
