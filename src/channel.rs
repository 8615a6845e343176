//! Channel resolution and listing

use grammers_client::types::peer::Peer;
use grammers_client::Client;

use crate::config::{ChannelEntity, Config};
use crate::error::{Error, Result};

/// Resolve a ChannelEntity to an actual Peer
pub async fn resolve_channel(client: &Client, entity: &ChannelEntity) -> Result<Peer> {
    match entity {
        ChannelEntity::Id(target_id) => {
            // Lookup by ID requires the channel to be in the user's dialogs
            let mut dialogs = client.iter_dialogs();

            while let Some(dialog) = dialogs
                .next()
                .await
                .map_err(|e| Error::TelegramError(e.to_string()))?
            {
                if let Peer::Channel(channel) = &dialog.peer {
                    // Compare using raw ID from the underlying TL type
                    let channel_id = channel.raw.id;
                    if channel_id == *target_id {
                        return Ok(Peer::Channel(channel.clone()));
                    }
                }
            }

            Err(Error::ChannelNotFound(format!(
                "Channel {} not found in dialogs",
                target_id
            )))
        }
        ChannelEntity::Username(username) => client
            .resolve_username(username)
            .await
            .map_err(|e| Error::TelegramError(e.to_string()))?
            .ok_or_else(|| Error::ChannelNotFound(format!("Username @{} not found", username))),
    }
}

/// Get the display name for a peer
pub fn peer_name(peer: &Peer) -> String {
    peer.name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Find a channel by name (config alias first, then as a public username)
pub async fn find_channel(client: &Client, config: &Config, name: &str) -> Result<Peer> {
    let entity = config.resolve_channel(name);
    resolve_channel(client, &entity).await
}

/// List broadcast channels present in the user's dialogs.
pub async fn list_channels(client: &Client) -> Result<Vec<(i64, String)>> {
    let mut channels = Vec::new();
    let mut dialogs = client.iter_dialogs();

    while let Some(dialog) = dialogs
        .next()
        .await
        .map_err(|e| Error::TelegramError(e.to_string()))?
    {
        if let Peer::Channel(channel) = &dialog.peer {
            channels.push((channel.raw.id, peer_name(&dialog.peer)));
        }
    }

    Ok(channels)
}
