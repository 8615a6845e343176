//! List configured channel aliases and channels visible in dialogs

use crate::channel::list_channels;
use crate::config::{ChannelEntity, Config};
use crate::error::Result;
use crate::session::{get_client, SessionLock};

pub async fn run() -> Result<()> {
    let config = Config::new();

    if !config.channels.is_empty() {
        println!("Configured channels:");
        let mut aliases: Vec<_> = config.channels.iter().collect();
        aliases.sort_by_key(|(alias, _)| alias.as_str());
        for (alias, entity) in aliases {
            match entity {
                ChannelEntity::Id(id) => println!("  {} -> id {}", alias, id),
                ChannelEntity::Username(name) => println!("  {} -> @{}", alias, name),
            }
        }
        println!();
    }

    let _lock = SessionLock::acquire()?;
    let client = get_client().await?;

    let channels = list_channels(&client).await?;

    if channels.is_empty() {
        println!("No channels found in dialogs");
        return Ok(());
    }

    println!("Channels in dialogs:");
    println!("{:<16} Name", "ID");
    for (id, name) in &channels {
        println!("{:<16} {}", id, name);
    }
    println!("\nTotal: {} channels", channels.len());

    Ok(())
}
