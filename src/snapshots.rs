//! Subscriber snapshot storage
//!
//! Snapshots are kept as one JSON file per channel under the snapshot
//! directory. Growth projection reads the whole series; each report run
//! appends the subscriber count it observed.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::analytics::growth::ChannelSnapshot;
use crate::error::Result;

/// File-backed store of subscriber snapshots, keyed by channel name.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, channel: &str) -> PathBuf {
        // Channel names may come from config keys or usernames; keep
        // the file name safe for the filesystem.
        let safe: String = channel
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }

    /// Load all snapshots recorded for a channel, oldest first.
    /// A missing file means no history yet, not an error.
    pub fn load(&self, channel: &str) -> Result<Vec<ChannelSnapshot>> {
        let path = self.path_for(channel);
        if !path.exists() {
            debug!(channel, "no snapshot history yet");
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&path)?;
        let snapshots: Vec<ChannelSnapshot> = serde_json::from_str(&data)?;
        Ok(snapshots)
    }

    /// Append a snapshot to a channel's history.
    pub fn append(&self, channel: &str, snapshot: ChannelSnapshot) -> Result<()> {
        let path = self.path_for(channel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut snapshots = self.load(channel)?;
        snapshots.push(snapshot);
        write_json(&path, &snapshots)?;

        debug!(channel, total = snapshots.len(), "snapshot appended");
        Ok(())
    }
}

fn write_json(path: &Path, snapshots: &[ChannelSnapshot]) -> Result<()> {
    let data = serde_json::to_string_pretty(snapshots)?;
    fs::write(path, data)?;
    Ok(())
}
