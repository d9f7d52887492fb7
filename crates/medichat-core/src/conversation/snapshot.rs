//! Local snapshot persistence.
//!
//! The snapshot is the locally persisted copy of the active conversation id
//! and transcript, used to survive a page/app reload. It is a passive
//! write-through target: it only ever reflects the controller's last write
//! and has no mutation authority of its own.

use super::model::{ConversationId, Transcript};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The persisted pair of active conversation id and transcript.
///
/// The id is `None` while the conversation has not been persisted remotely
/// yet (first send still pending or failed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The active conversation id at the time of the write, if assigned.
    pub conversation_id: Option<ConversationId>,
    /// The transcript at the time of the write.
    pub transcript: Transcript,
}

/// An abstract store for the session snapshot.
///
/// This trait defines the contract for persisting the active conversation
/// locally, decoupling the controller from the specific storage medium
/// (e.g., a JSON file, an in-memory map in tests).
///
/// # Implementation Notes
///
/// Persistence is best-effort: `write` and `clear` must not surface errors
/// to the caller (storage quota, permissions). Implementations log failures
/// and carry on; a failed write simply means the next reload starts fresh.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persists the snapshot, overwriting any prior value.
    async fn write(&self, snapshot: &Snapshot);

    /// Returns the last written snapshot, or `None` if never written,
    /// cleared, or unreadable.
    async fn read(&self) -> Option<Snapshot>;

    /// Removes the persisted snapshot.
    async fn clear(&self);
}
