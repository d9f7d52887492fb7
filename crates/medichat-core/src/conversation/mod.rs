//! Conversation domain module.
//!
//! This module contains all conversation-related domain models, the pure
//! transcript reducer, and the trait seams to local persistence and the
//! remote backend.
//!
//! # Module Structure
//!
//! - `message`: Message types (`MessageRole`, `MessageKind`, `Message`)
//! - `model`: Core domain models (`Transcript`, `ConversationSummary`, `ConversationDetail`)
//! - `reducer`: Pure transcript state updates (`TranscriptEvent`, `reduce`)
//! - `snapshot`: Local persistence seam (`Snapshot`, `SnapshotStore`)
//! - `client`: Remote backend seam (`ConversationClient`)

mod client;
mod message;
mod model;
mod reducer;
mod snapshot;

// Re-export public API
pub use client::{ConversationClient, MessagePayload, SendMessageRequest, SendMessageResponse};
pub use message::{Message, MessageKind, MessageRole};
pub use model::{ConversationDetail, ConversationId, ConversationSummary, Transcript};
pub use reducer::{TranscriptEvent, reduce};
pub use snapshot::{Snapshot, SnapshotStore};
