//! File-backed SnapshotStore implementation.
//!
//! Persists the active conversation snapshot as a single JSON file under
//! the medichat config directory. Writes and clears are best-effort per the
//! `SnapshotStore` contract: failures are logged and swallowed, never
//! surfaced to the controller.

use async_trait::async_trait;
use medichat_core::conversation::{Snapshot, SnapshotStore};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Snapshot store persisting to a single JSON file.
///
/// The file only ever reflects the controller's last write; there is no
/// merging and last-write-wins across processes.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Creates a store at the default location
    /// (`~/.config/medichat/snapshot.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be
    /// determined.
    pub fn default_location() -> medichat_core::Result<Self> {
        use crate::paths::MedichatPaths;
        let path = MedichatPaths::snapshot_file().map_err(|e| {
            medichat_core::MedichatError::config(format!("Failed to get snapshot path: {}", e))
        })?;
        Ok(Self::new(path))
    }

    /// Creates a store persisting to the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the file path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn try_write(&self, snapshot: &Snapshot) -> medichat_core::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn write(&self, snapshot: &Snapshot) {
        if let Err(e) = self.try_write(snapshot).await {
            tracing::warn!("Failed to persist snapshot to {:?}: {}", self.path, e);
        }
    }

    async fn read(&self) -> Option<Snapshot> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read snapshot from {:?}: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                // Corrupt snapshot reads as absent; the next write overwrites it.
                tracing::warn!("Discarding unreadable snapshot at {:?}: {}", self.path, e);
                None
            }
        }
    }

    async fn clear(&self) {
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!("Failed to clear snapshot at {:?}: {}", self.path, e);
            }
        }
    }
}
