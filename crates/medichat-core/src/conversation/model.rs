//! Conversation domain models.
//!
//! This module contains the core conversation entities the client operates
//! on: the transcript of the active conversation, the per-conversation
//! detail returned by the backend, and the lightweight listing entry used
//! by the sidebar.

use super::message::Message;
use serde::{Deserialize, Serialize};

/// Opaque conversation identifier assigned by the backend.
///
/// A not-yet-persisted conversation has no id; callers carry
/// `Option<ConversationId>` for that case.
pub type ConversationId = String;

/// The ordered message sequence of one conversation, held in memory for
/// display.
///
/// A transcript is always associated with exactly one conversation id (or
/// none, for a new unsaved conversation); transcript and id are replaced
/// together when the active conversation changes. Mutation happens only
/// through the reducer in [`super::reducer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcript from an already-ordered message list.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Returns the messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the transcript has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn append(&mut self, message: Message) {
        self.messages.push(message);
    }
}

/// Lightweight listing entry for a conversation, used by the sidebar.
///
/// Summaries have an independent lifecycle from transcripts: they are
/// fetched in bulk, while a transcript is the detail view of one summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Backend-assigned conversation id.
    pub id: ConversationId,
    /// Human-readable conversation title.
    pub title: String,
    /// Text of the most recent message, if any.
    pub last_message_text: Option<String>,
    /// Timestamp of the last update (ISO 8601 format).
    pub updated_at: String,
}

/// Full detail of one conversation as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationDetail {
    /// Human-readable conversation title.
    pub title: String,
    /// Complete message list in server order.
    pub messages: Vec<Message>,
}
