//! Remote conversation client trait.
//!
//! Defines the interface for the backend conversation API, decoupling the
//! controller from the HTTP transport. All operations are single-attempt:
//! no retry, no backoff. On failure the caller must not assume any
//! server-side mutation occurred.

use super::message::Message;
use super::model::{ConversationDetail, ConversationId, ConversationSummary};
use crate::error::Result;
use async_trait::async_trait;

/// The payload of an outgoing message.
#[derive(Debug, Clone)]
pub enum MessagePayload {
    /// Plain text typed by the user.
    Text(String),
    /// Recorded audio bytes from the capture device.
    Audio(Vec<u8>),
}

/// Request to post a new message.
///
/// When `conversation_id` is `None` the backend creates a new conversation
/// and returns its id in the response.
#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    /// Target conversation, or `None` for a not-yet-persisted one.
    pub conversation_id: Option<ConversationId>,
    /// The message content.
    pub payload: MessagePayload,
}

/// Response to a posted message.
#[derive(Debug, Clone)]
pub struct SendMessageResponse {
    /// The conversation id, newly assigned if the request carried none.
    pub conversation_id: ConversationId,
    /// The assistant reply.
    pub reply: Message,
}

/// An abstract client for the backend conversation API.
///
/// # Errors
///
/// All operations fail with `Unauthorized` when the bearer credential is
/// missing or rejected, and `Network` on transport or server failure.
/// Operations addressing a specific conversation additionally fail with
/// `NotFound` for a stale or deleted id.
#[async_trait]
pub trait ConversationClient: Send + Sync {
    /// Lists the account's conversations, most recently updated first.
    /// Returns an empty list for an account with no conversations.
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>>;

    /// Fetches one conversation's title and full message list.
    async fn get_conversation(&self, id: &str) -> Result<ConversationDetail>;

    /// Posts a new message, creating the conversation if the request
    /// carries no id.
    async fn send_message(&self, request: SendMessageRequest) -> Result<SendMessageResponse>;

    /// Renames a conversation.
    async fn rename_conversation(&self, id: &str, title: &str) -> Result<()>;

    /// Deletes a conversation.
    async fn delete_conversation(&self, id: &str) -> Result<()>;
}
