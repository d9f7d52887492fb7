//! Session controller: the single owner of the live conversation state.
//!
//! `SessionController` keeps the in-memory transcript, the persisted local
//! snapshot, and the remote backend consistent as the user navigates,
//! sends messages, and reloads. Every screen consumes the same controller
//! through its read-only [`SessionView`]; the snapshot store and remote
//! client are injected so tests substitute fakes.

use medichat_core::conversation::{
    ConversationClient, ConversationId, ConversationSummary, Message, MessageKind, MessagePayload,
    SendMessageRequest, Snapshot, SnapshotStore, Transcript, TranscriptEvent, reduce,
};
use medichat_core::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Assistant-role notice appended in place of a reply when a send fails.
/// The user's optimistic message stays in the transcript, so no input is
/// lost.
pub const SEND_FAILURE_NOTICE: &str =
    "Sorry, your message could not be delivered. Please check your connection and try again.";

/// Transcript display text for an outgoing voice note; the recorded bytes
/// travel only on the wire.
pub const VOICE_NOTE_PLACEHOLDER: &str = "[voice message]";

/// The controller's lifecycle state.
///
/// The active conversation id lives next to the state rather than inside
/// `Ready`: transcript and id are replaced together on every transition,
/// and the pair is exposed through [`SessionView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Created but not yet hydrated.
    Uninitialized,
    /// A remote fetch for the active conversation is in flight.
    Hydrating,
    /// Waiting for user input.
    Ready,
    /// A message send is in flight; further sends are refused until it
    /// resolves.
    Sending,
}

/// Read-only view of the controller for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub state: SessionState,
    pub conversation_id: Option<ConversationId>,
    pub transcript: Transcript,
}

struct Inner {
    state: SessionState,
    conversation_id: Option<ConversationId>,
    transcript: Transcript,
    /// Navigation epoch; bumped on every conversation switch so a send or
    /// hydration that resolves after the user moved on is dropped whole.
    epoch: u64,
}

impl Inner {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            conversation_id: self.conversation_id.clone(),
            transcript: self.transcript.clone(),
        }
    }
}

/// Orchestrates navigation-triggered loads, snapshot hydration, and
/// write-through of transcript updates for the active conversation.
///
/// The controller lives for the lifetime of the app session; there is no
/// terminal state.
pub struct SessionController {
    inner: RwLock<Inner>,
    client: Arc<dyn ConversationClient>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl SessionController {
    /// Creates a controller in the `Uninitialized` state.
    pub fn new(client: Arc<dyn ConversationClient>, snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: SessionState::Uninitialized,
                conversation_id: None,
                transcript: Transcript::new(),
                epoch: 0,
            }),
            client,
            snapshots,
        }
    }

    /// Returns a cloned read-only view of the current session.
    pub async fn view(&self) -> SessionView {
        let inner = self.inner.read().await;
        SessionView {
            state: inner.state,
            conversation_id: inner.conversation_id.clone(),
            transcript: inner.transcript.clone(),
        }
    }

    /// Hydrates the session on app start.
    ///
    /// With a conversation id from the URL the transcript is always fetched
    /// fresh; a `NotFound` id clears the snapshot and falls back to a fresh
    /// unsaved conversation. Without a URL id the persisted snapshot, if
    /// any, is restored as-is (snapshots are trusted only for a
    /// same-session reload).
    ///
    /// # Errors
    ///
    /// Propagates `Unauthorized` and `Network` fetch failures; the caller
    /// redirects to login or shows a retry surface.
    pub async fn initialize(&self, url_conversation_id: Option<&str>) -> Result<()> {
        match url_conversation_id {
            Some(id) => self.hydrate_from_remote(id).await,
            None => {
                let snapshot = self.snapshots.read().await;
                let mut inner = self.inner.write().await;
                match snapshot {
                    Some(snapshot) => {
                        inner.conversation_id = snapshot.conversation_id;
                        inner.transcript = snapshot.transcript;
                    }
                    None => {
                        inner.conversation_id = None;
                        inner.transcript = Transcript::new();
                    }
                }
                inner.state = SessionState::Ready;
                Ok(())
            }
        }
    }

    /// Switches to a different conversation, fetching it fresh from the
    /// backend.
    ///
    /// Bumps the navigation epoch, so the eventual resolution of any
    /// in-flight send against the previous conversation is ignored.
    ///
    /// # Errors
    ///
    /// Propagates `Unauthorized` and `Network` failures, restoring the
    /// previous session state. `NotFound` is not an error here: the stale
    /// id falls back to a fresh unsaved conversation.
    pub async fn select_conversation(&self, id: &str) -> Result<()> {
        self.hydrate_from_remote(id).await
    }

    /// Clears the transcript and snapshot and enters a fresh, unsaved
    /// conversation.
    pub async fn start_new_chat(&self) {
        {
            let mut inner = self.inner.write().await;
            inner.epoch += 1;
            inner.conversation_id = None;
            inner.transcript = Transcript::new();
            inner.state = SessionState::Ready;
        }
        self.snapshots.clear().await;
    }

    /// Sends a text message in the active conversation.
    ///
    /// Empty or whitespace-only input is a no-op. See [`Self::send`] for
    /// the shared send semantics.
    pub async fn send_text(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        self.send(
            MessagePayload::Text(trimmed.to_string()),
            trimmed.to_string(),
            MessageKind::Text,
        )
        .await
    }

    /// Sends a recorded voice note in the active conversation.
    ///
    /// An empty recording is a no-op; the transcript shows a fixed
    /// placeholder for the audio content.
    pub async fn send_audio(&self, audio: Vec<u8>) -> Result<()> {
        if audio.is_empty() {
            return Ok(());
        }
        self.send(
            MessagePayload::Audio(audio),
            VOICE_NOTE_PLACEHOLDER.to_string(),
            MessageKind::Audio,
        )
        .await
    }

    /// Lists the account's conversations for the sidebar.
    pub async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        self.client.list_conversations().await
    }

    /// Renames a conversation.
    pub async fn rename_conversation(&self, id: &str, title: &str) -> Result<()> {
        self.client.rename_conversation(id, title).await
    }

    /// Deletes a conversation. Deleting the active one additionally clears
    /// the live transcript and the snapshot.
    pub async fn delete_conversation(&self, id: &str) -> Result<()> {
        self.client.delete_conversation(id).await?;

        let was_active = {
            let inner = self.inner.read().await;
            inner.conversation_id.as_deref() == Some(id)
        };
        if was_active {
            self.start_new_chat().await;
        }
        Ok(())
    }

    /// Shared send path: optimistic append, `Sending` for the duration of
    /// the remote call, write-through of every transcript change.
    ///
    /// On success the server reply is appended and a server-assigned
    /// conversation id adopted. On `Network` failure an assistant error
    /// notice is appended instead; the optimistic message is never rolled
    /// back and the conversation id is unchanged. `Unauthorized` is
    /// propagated for the shell to redirect to login.
    async fn send(
        &self,
        payload: MessagePayload,
        display_content: String,
        kind: MessageKind,
    ) -> Result<()> {
        let (epoch, conversation_id) = {
            let mut inner = self.inner.write().await;
            if inner.state != SessionState::Ready {
                // At-most-one in-flight send; submits are only accepted
                // while the controller waits for input.
                tracing::warn!("send refused in state {:?}", inner.state);
                return Ok(());
            }
            inner.transcript = reduce(
                &inner.transcript,
                TranscriptEvent::OptimisticUserMessage {
                    content: display_content,
                    kind,
                },
            );
            inner.state = SessionState::Sending;
            (inner.epoch, inner.conversation_id.clone())
        };
        self.write_snapshot().await;

        // Lock released while the request is in flight; navigation stays
        // possible and bumps the epoch.
        let result = self
            .client
            .send_message(SendMessageRequest {
                conversation_id: conversation_id.clone(),
                payload,
            })
            .await;

        let mut inner = self.inner.write().await;
        if inner.epoch != epoch {
            // The user switched conversations while the send was in flight;
            // the displayed transcript no longer belongs to this send.
            tracing::debug!("dropping stale send result for {:?}", conversation_id);
            return Ok(());
        }

        match result {
            Ok(response) => {
                inner.transcript = reduce(
                    &inner.transcript,
                    TranscriptEvent::ServerReplyReceived {
                        message: response.reply,
                    },
                );
                inner.conversation_id = Some(response.conversation_id);
                inner.state = SessionState::Ready;
                drop(inner);
                self.write_snapshot().await;
                Ok(())
            }
            Err(e) if e.is_unauthorized() => {
                inner.state = SessionState::Ready;
                Err(e)
            }
            Err(e) => {
                tracing::warn!("message send failed: {}", e);
                inner.transcript = reduce(
                    &inner.transcript,
                    TranscriptEvent::ServerReplyReceived {
                        message: Message::assistant(SEND_FAILURE_NOTICE),
                    },
                );
                inner.state = SessionState::Ready;
                drop(inner);
                self.write_snapshot().await;
                Ok(())
            }
        }
    }

    /// Fetches a conversation and replaces the live transcript with it.
    async fn hydrate_from_remote(&self, id: &str) -> Result<()> {
        let (epoch, previous_id, previous_transcript) = {
            let mut inner = self.inner.write().await;
            inner.epoch += 1;
            inner.state = SessionState::Hydrating;
            (
                inner.epoch,
                inner.conversation_id.clone(),
                inner.transcript.clone(),
            )
        };

        let result = self.client.get_conversation(id).await;

        let mut inner = self.inner.write().await;
        if inner.epoch != epoch {
            tracing::debug!("dropping stale hydration result for '{}'", id);
            return Ok(());
        }

        match result {
            Ok(detail) => {
                inner.transcript = reduce(
                    &inner.transcript,
                    TranscriptEvent::TranscriptReplaced {
                        messages: detail.messages,
                    },
                );
                inner.conversation_id = Some(id.to_string());
                inner.state = SessionState::Ready;
                drop(inner);
                self.write_snapshot().await;
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                // Stale or deleted id: fall back to a fresh unsaved
                // conversation.
                tracing::warn!("conversation '{}' not found, starting fresh", id);
                inner.conversation_id = None;
                inner.transcript = Transcript::new();
                inner.state = SessionState::Ready;
                drop(inner);
                self.snapshots.clear().await;
                Ok(())
            }
            Err(e) => {
                inner.conversation_id = previous_id;
                inner.transcript = previous_transcript;
                inner.state = SessionState::Ready;
                Err(e)
            }
        }
    }

    /// Writes the current session through to the snapshot store when the
    /// transcript is non-empty. Best-effort by contract.
    async fn write_snapshot(&self) {
        let snapshot = {
            let inner = self.inner.read().await;
            if inner.transcript.is_empty() {
                return;
            }
            inner.snapshot()
        };
        self.snapshots.write(&snapshot).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use medichat_core::MedichatError;
    use medichat_core::conversation::{ConversationDetail, MessageRole, SendMessageResponse};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    // Mock ConversationClient for testing
    struct MockConversationClient {
        send_results: Mutex<VecDeque<Result<SendMessageResponse>>>,
        conversations: Mutex<HashMap<String, ConversationDetail>>,
        /// When set, the next send blocks until the sender half fires.
        send_gate: Mutex<Option<oneshot::Receiver<()>>>,
        sent_requests: Mutex<Vec<Option<String>>>,
        deleted: Mutex<Vec<String>>,
    }

    impl MockConversationClient {
        fn new() -> Self {
            Self {
                send_results: Mutex::new(VecDeque::new()),
                conversations: Mutex::new(HashMap::new()),
                send_gate: Mutex::new(None),
                sent_requests: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
            }
        }

        fn queue_send(&self, result: Result<SendMessageResponse>) {
            self.send_results.lock().unwrap().push_back(result);
        }

        fn insert_conversation(&self, id: &str, detail: ConversationDetail) {
            self.conversations
                .lock()
                .unwrap()
                .insert(id.to_string(), detail);
        }

        fn gate_next_send(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            *self.send_gate.lock().unwrap() = Some(rx);
            tx
        }

        fn send_count(&self) -> usize {
            self.sent_requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ConversationClient for MockConversationClient {
        async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
            Ok(Vec::new())
        }

        async fn get_conversation(&self, id: &str) -> Result<ConversationDetail> {
            self.conversations
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| MedichatError::not_found("conversation", id))
        }

        async fn send_message(&self, request: SendMessageRequest) -> Result<SendMessageResponse> {
            self.sent_requests
                .lock()
                .unwrap()
                .push(request.conversation_id.clone());
            let gate = self.send_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.send_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected send_message call")
        }

        async fn rename_conversation(&self, _id: &str, _title: &str) -> Result<()> {
            Ok(())
        }

        async fn delete_conversation(&self, id: &str) -> Result<()> {
            self.deleted.lock().unwrap().push(id.to_string());
            Ok(())
        }
    }

    // Mock SnapshotStore for testing
    #[derive(Default)]
    struct MemorySnapshotStore {
        snapshot: Mutex<Option<Snapshot>>,
    }

    impl MemorySnapshotStore {
        fn current(&self) -> Option<Snapshot> {
            self.snapshot.lock().unwrap().clone()
        }

        fn preload(&self, snapshot: Snapshot) {
            *self.snapshot.lock().unwrap() = Some(snapshot);
        }
    }

    #[async_trait]
    impl SnapshotStore for MemorySnapshotStore {
        async fn write(&self, snapshot: &Snapshot) {
            *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        }

        async fn read(&self) -> Option<Snapshot> {
            self.snapshot.lock().unwrap().clone()
        }

        async fn clear(&self) {
            *self.snapshot.lock().unwrap() = None;
        }
    }

    fn controller(
        client: Arc<MockConversationClient>,
        snapshots: Arc<MemorySnapshotStore>,
    ) -> SessionController {
        SessionController::new(client, snapshots)
    }

    fn reply(conversation_id: &str, text: &str) -> SendMessageResponse {
        SendMessageResponse {
            conversation_id: conversation_id.to_string(),
            reply: Message::assistant(text),
        }
    }

    fn detail(title: &str, contents: &[&str]) -> ConversationDetail {
        ConversationDetail {
            title: title.to_string(),
            messages: contents.iter().map(|c| Message::assistant(*c)).collect(),
        }
    }

    #[tokio::test]
    async fn test_initialize_without_url_or_snapshot_is_fresh() {
        let client = Arc::new(MockConversationClient::new());
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client, snapshots);

        controller.initialize(None).await.unwrap();

        let view = controller.view().await;
        assert_eq!(view.state, SessionState::Ready);
        assert_eq!(view.conversation_id, None);
        assert!(view.transcript.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_restores_snapshot() {
        let client = Arc::new(MockConversationClient::new());
        let snapshots = Arc::new(MemorySnapshotStore::default());
        snapshots.preload(Snapshot {
            conversation_id: Some("c1".to_string()),
            transcript: Transcript::from_messages(vec![Message::assistant("welcome back")]),
        });
        let controller = controller(client, snapshots);

        controller.initialize(None).await.unwrap();

        let view = controller.view().await;
        assert_eq!(view.state, SessionState::Ready);
        assert_eq!(view.conversation_id, Some("c1".to_string()));
        assert_eq!(view.transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_initialize_with_url_id_fetches_fresh_and_writes_snapshot() {
        let client = Arc::new(MockConversationClient::new());
        client.insert_conversation("c1", detail("Checkup", &["hello from server"]));
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client, snapshots.clone());

        controller.initialize(Some("c1")).await.unwrap();

        let view = controller.view().await;
        assert_eq!(view.state, SessionState::Ready);
        assert_eq!(view.conversation_id, Some("c1".to_string()));
        assert_eq!(view.transcript.messages()[0].content, "hello from server");

        let snapshot = snapshots.current().unwrap();
        assert_eq!(snapshot.conversation_id, Some("c1".to_string()));
        assert_eq!(snapshot.transcript, view.transcript);
    }

    #[tokio::test]
    async fn test_initialize_with_unknown_id_falls_back_fresh_and_clears_snapshot() {
        let client = Arc::new(MockConversationClient::new());
        let snapshots = Arc::new(MemorySnapshotStore::default());
        snapshots.preload(Snapshot {
            conversation_id: Some("gone".to_string()),
            transcript: Transcript::from_messages(vec![Message::assistant("stale")]),
        });
        let controller = controller(client, snapshots.clone());

        controller.initialize(Some("gone")).await.unwrap();

        let view = controller.view().await;
        assert_eq!(view.state, SessionState::Ready);
        assert_eq!(view.conversation_id, None);
        assert!(view.transcript.is_empty());
        assert_eq!(snapshots.current(), None);
    }

    #[tokio::test]
    async fn test_send_happy_path_adopts_server_id() {
        let client = Arc::new(MockConversationClient::new());
        client.queue_send(Ok(reply("c1", "hi")));
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client, snapshots.clone());
        controller.initialize(None).await.unwrap();

        controller.send_text("hello").await.unwrap();

        let view = controller.view().await;
        assert_eq!(view.state, SessionState::Ready);
        assert_eq!(view.conversation_id, Some("c1".to_string()));
        let messages = view.transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "hi");

        let snapshot = snapshots.current().unwrap();
        assert_eq!(snapshot.conversation_id, Some("c1".to_string()));
        assert_eq!(snapshot.transcript, view.transcript);
    }

    #[tokio::test]
    async fn test_send_network_failure_keeps_optimistic_and_appends_notice() {
        let client = Arc::new(MockConversationClient::new());
        client.queue_send(Err(MedichatError::network("connection reset")));
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client, snapshots.clone());
        controller.initialize(None).await.unwrap();

        controller.send_text("hello").await.unwrap();

        let view = controller.view().await;
        assert_eq!(view.state, SessionState::Ready);
        assert_eq!(view.conversation_id, None);
        let messages = view.transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, SEND_FAILURE_NOTICE);

        // The write-through never recorded a server-assigned id.
        let snapshot = snapshots.current().unwrap();
        assert_eq!(snapshot.conversation_id, None);
    }

    #[tokio::test]
    async fn test_send_unauthorized_propagates_without_notice() {
        let client = Arc::new(MockConversationClient::new());
        client.queue_send(Err(MedichatError::unauthorized("expired")));
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client, snapshots);
        controller.initialize(None).await.unwrap();

        let err = controller.send_text("hello").await.unwrap_err();
        assert!(err.is_unauthorized());

        let view = controller.view().await;
        assert_eq!(view.state, SessionState::Ready);
        // Optimistic message preserved, no failure notice appended.
        assert_eq!(view.transcript.len(), 1);
        assert_eq!(view.transcript.messages()[0].content, "hello");
    }

    #[tokio::test]
    async fn test_whitespace_send_is_noop() {
        let client = Arc::new(MockConversationClient::new());
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client.clone(), snapshots);
        controller.initialize(None).await.unwrap();

        controller.send_text("   \n\t ").await.unwrap();
        controller.send_text("").await.unwrap();

        let view = controller.view().await;
        assert_eq!(view.state, SessionState::Ready);
        assert!(view.transcript.is_empty());
        assert_eq!(client.send_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_audio_is_noop() {
        let client = Arc::new(MockConversationClient::new());
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client.clone(), snapshots);
        controller.initialize(None).await.unwrap();

        controller.send_audio(Vec::new()).await.unwrap();

        assert_eq!(client.send_count(), 0);
    }

    #[tokio::test]
    async fn test_audio_send_uses_placeholder_content() {
        let client = Arc::new(MockConversationClient::new());
        client.queue_send(Ok(reply("c1", "noted")));
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client, snapshots);
        controller.initialize(None).await.unwrap();

        controller.send_audio(vec![0u8, 1, 2]).await.unwrap();

        let view = controller.view().await;
        let first = &view.transcript.messages()[0];
        assert_eq!(first.kind, MessageKind::Audio);
        assert_eq!(first.content, VOICE_NOTE_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_reentrant_send_is_refused() {
        let client = Arc::new(MockConversationClient::new());
        client.queue_send(Ok(reply("c1", "hi")));
        let gate = client.gate_next_send();
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = Arc::new(controller(client.clone(), snapshots));
        controller.initialize(None).await.unwrap();

        let background = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send_text("first").await })
        };
        while controller.view().await.state != SessionState::Sending {
            tokio::task::yield_now().await;
        }

        // Second send while the first is in flight: refused, nothing appended.
        controller.send_text("second").await.unwrap();
        assert_eq!(controller.view().await.transcript.len(), 1);
        assert_eq!(client.send_count(), 1);

        gate.send(()).unwrap();
        background.await.unwrap().unwrap();
        assert_eq!(controller.view().await.transcript.len(), 2);
    }

    #[tokio::test]
    async fn test_stale_send_result_is_ignored_after_switch() {
        let client = Arc::new(MockConversationClient::new());
        client.insert_conversation("c1", detail("First", &["one"]));
        client.insert_conversation("c2", detail("Second", &["two a", "two b"]));
        client.queue_send(Ok(reply("c1", "late reply")));
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = Arc::new(controller(client.clone(), snapshots));
        controller.initialize(Some("c1")).await.unwrap();

        let gate = client.gate_next_send();
        let background = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send_text("question for c1").await })
        };
        while controller.view().await.state != SessionState::Sending {
            tokio::task::yield_now().await;
        }

        controller.select_conversation("c2").await.unwrap();
        let before = controller.view().await;
        assert_eq!(before.conversation_id, Some("c2".to_string()));
        assert_eq!(before.transcript.len(), 2);

        // The c1 send resolves after navigation; the displayed transcript
        // must be unaffected.
        gate.send(()).unwrap();
        background.await.unwrap().unwrap();

        let after = controller.view().await;
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_select_conversation_always_fetches_fresh() {
        let client = Arc::new(MockConversationClient::new());
        client.insert_conversation("c2", detail("Second", &["fresh"]));
        let snapshots = Arc::new(MemorySnapshotStore::default());
        snapshots.preload(Snapshot {
            conversation_id: Some("c2".to_string()),
            transcript: Transcript::from_messages(vec![Message::assistant("stale local copy")]),
        });
        let controller = controller(client, snapshots);
        controller.initialize(None).await.unwrap();

        controller.select_conversation("c2").await.unwrap();

        let view = controller.view().await;
        assert_eq!(view.transcript.messages()[0].content, "fresh");
    }

    #[tokio::test]
    async fn test_select_network_failure_restores_previous_session() {
        struct FailingClient;

        #[async_trait]
        impl ConversationClient for FailingClient {
            async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
                Ok(Vec::new())
            }
            async fn get_conversation(&self, _id: &str) -> Result<ConversationDetail> {
                Err(MedichatError::network("backend down"))
            }
            async fn send_message(
                &self,
                _request: SendMessageRequest,
            ) -> Result<SendMessageResponse> {
                Err(MedichatError::network("backend down"))
            }
            async fn rename_conversation(&self, _id: &str, _title: &str) -> Result<()> {
                Ok(())
            }
            async fn delete_conversation(&self, _id: &str) -> Result<()> {
                Ok(())
            }
        }

        let snapshots = Arc::new(MemorySnapshotStore::default());
        snapshots.preload(Snapshot {
            conversation_id: Some("c1".to_string()),
            transcript: Transcript::from_messages(vec![Message::assistant("kept")]),
        });
        let controller = SessionController::new(Arc::new(FailingClient), snapshots);
        controller.initialize(None).await.unwrap();

        let err = controller.select_conversation("c2").await.unwrap_err();
        assert!(err.is_network());

        let view = controller.view().await;
        assert_eq!(view.state, SessionState::Ready);
        assert_eq!(view.conversation_id, Some("c1".to_string()));
        assert_eq!(view.transcript.messages()[0].content, "kept");
    }

    #[tokio::test]
    async fn test_start_new_chat_clears_transcript_and_snapshot() {
        let client = Arc::new(MockConversationClient::new());
        client.queue_send(Ok(reply("c1", "hi")));
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client, snapshots.clone());
        controller.initialize(None).await.unwrap();
        controller.send_text("hello").await.unwrap();
        assert!(snapshots.current().is_some());

        controller.start_new_chat().await;

        let view = controller.view().await;
        assert_eq!(view.state, SessionState::Ready);
        assert_eq!(view.conversation_id, None);
        assert!(view.transcript.is_empty());
        assert_eq!(snapshots.current(), None);
    }

    #[tokio::test]
    async fn test_delete_active_conversation_clears_session() {
        let client = Arc::new(MockConversationClient::new());
        client.insert_conversation("c1", detail("First", &["one"]));
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client.clone(), snapshots.clone());
        controller.initialize(Some("c1")).await.unwrap();

        controller.delete_conversation("c1").await.unwrap();

        assert_eq!(client.deleted.lock().unwrap().clone(), vec!["c1".to_string()]);
        let view = controller.view().await;
        assert_eq!(view.conversation_id, None);
        assert!(view.transcript.is_empty());
        assert_eq!(snapshots.current(), None);
    }

    #[tokio::test]
    async fn test_delete_other_conversation_leaves_session_untouched() {
        let client = Arc::new(MockConversationClient::new());
        client.insert_conversation("c1", detail("First", &["one"]));
        let snapshots = Arc::new(MemorySnapshotStore::default());
        let controller = controller(client.clone(), snapshots.clone());
        controller.initialize(Some("c1")).await.unwrap();

        controller.delete_conversation("c9").await.unwrap();

        let view = controller.view().await;
        assert_eq!(view.conversation_id, Some("c1".to_string()));
        assert_eq!(view.transcript.len(), 1);
        assert!(snapshots.current().is_some());
    }
}
