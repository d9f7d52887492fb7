//! Wire DTOs for the backend REST API.
//!
//! The backend speaks `{sender: "user"|"bot", text, timestamp}` for
//! messages; this module owns that shape and its 1:1 mapping onto the
//! domain model (`bot` maps to the assistant role).

use medichat_core::conversation::{
    ConversationDetail, ConversationSummary, Message, MessageKind, MessageRole,
};
use serde::{Deserialize, Serialize};

/// A message as the backend serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub sender: WireSender,
    pub text: String,
    pub timestamp: String,
}

/// Sender tag on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireSender {
    User,
    Bot,
}

impl From<WireMessage> for Message {
    fn from(wire: WireMessage) -> Self {
        Message {
            role: match wire.sender {
                WireSender::User => MessageRole::User,
                WireSender::Bot => MessageRole::Assistant,
            },
            kind: MessageKind::Text,
            content: wire.text,
            timestamp: wire.timestamp,
        }
    }
}

/// Listing entry as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireConversationSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub last_message_text: Option<String>,
    pub updated_at: String,
}

impl From<WireConversationSummary> for ConversationSummary {
    fn from(wire: WireConversationSummary) -> Self {
        ConversationSummary {
            id: wire.id,
            title: wire.title,
            last_message_text: wire.last_message_text,
            updated_at: wire.updated_at,
        }
    }
}

/// Response body of a conversation fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct WireConversationDetail {
    pub title: String,
    pub messages: Vec<WireMessage>,
}

impl From<WireConversationDetail> for ConversationDetail {
    fn from(wire: WireConversationDetail) -> Self {
        ConversationDetail {
            title: wire.title,
            messages: wire.messages.into_iter().map(Message::from).collect(),
        }
    }
}

/// Request body of a text message post.
#[derive(Debug, Clone, Serialize)]
pub struct WireSendTextRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub text: String,
}

/// Response body of a message post.
#[derive(Debug, Clone, Deserialize)]
pub struct WireSendResponse {
    pub conversation_id: String,
    pub reply: WireMessage,
}

/// Request body of a conversation rename.
#[derive(Debug, Clone, Serialize)]
pub struct WireRenameRequest {
    pub title: String,
}
