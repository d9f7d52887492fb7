//! Conversation message types.
//!
//! This module contains types for representing messages in a conversation,
//! including roles, content kinds, and message content.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant.
    Assistant,
}

/// The content kind of a message.
///
/// Audio messages carry their recorded bytes only on the wire; in a
/// transcript they are represented by a textual placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Plain text message.
    Text,
    /// Voice-note message.
    Audio,
}

/// A single message in a conversation transcript.
///
/// Messages are immutable once appended to a transcript; ordering is
/// insertion order, with server-assigned timestamps as the only authority
/// beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content kind (text or audio).
    pub kind: MessageKind,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl Message {
    /// Creates a user message stamped with the current time.
    pub fn user(content: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            role: MessageRole::User,
            kind,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates a text assistant message stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            kind: MessageKind::Text,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
