//! Pure transcript state updates.
//!
//! All transcript mutation flows through [`reduce`], which maps the current
//! transcript and one event to a new transcript. Keeping this pure lets the
//! controller own the only mutable copy and makes every update trivially
//! testable without storage or network.

use super::message::{Message, MessageKind};
use super::model::Transcript;
use serde::{Deserialize, Serialize};

/// An event that updates the active transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptEvent {
    /// A user message appended immediately, before server confirmation.
    ///
    /// Applying the same event twice appends twice; guarding against
    /// duplicate submission is the caller's job (the controller refuses a
    /// send while one is in flight).
    OptimisticUserMessage { content: String, kind: MessageKind },
    /// A confirmed assistant reply from the server.
    ServerReplyReceived { message: Message },
    /// Wholesale replacement, used when switching conversations or after a
    /// fresh fetch. Applying the same replacement twice is idempotent.
    TranscriptReplaced { messages: Vec<Message> },
}

/// Applies one event to a transcript and returns the resulting transcript.
pub fn reduce(current: &Transcript, event: TranscriptEvent) -> Transcript {
    match event {
        TranscriptEvent::OptimisticUserMessage { content, kind } => {
            let mut next = current.clone();
            next.append(Message::user(content, kind));
            next
        }
        TranscriptEvent::ServerReplyReceived { message } => {
            let mut next = current.clone();
            next.append(message);
            next
        }
        TranscriptEvent::TranscriptReplaced { messages } => Transcript::from_messages(messages),
    }
}
