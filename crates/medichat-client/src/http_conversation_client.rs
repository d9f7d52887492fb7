//! HTTP implementation of the `ConversationClient` trait.
//!
//! Talks to the backend REST API over HTTP+JSON with a bearer credential
//! attached to every request. Audio messages are uploaded as multipart
//! form data. Every operation is a single attempt; the controller decides
//! how a failure is surfaced.

use crate::wire::{
    WireConversationDetail, WireConversationSummary, WireRenameRequest, WireSendResponse,
    WireSendTextRequest,
};
use async_trait::async_trait;
use medichat_core::auth::CredentialProvider;
use medichat_core::config::RootConfig;
use medichat_core::conversation::{
    ConversationClient, ConversationDetail, ConversationSummary, MessagePayload,
    SendMessageRequest, SendMessageResponse,
};
use medichat_core::{MedichatError, Result};
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;

const AUDIO_FIELD: &str = "audio";
const AUDIO_FILE_NAME: &str = "recording.webm";

/// Conversation client backed by the backend REST API.
#[derive(Clone)]
pub struct HttpConversationClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpConversationClient {
    /// Creates a new client with the provided configuration.
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout,
            credentials,
        }
    }

    /// Creates a client from the application configuration.
    pub fn from_config(config: &RootConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::new(
            config.backend.base_url.clone(),
            Duration::from_secs(config.backend.request_timeout_secs),
            credentials,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Returns the current bearer token, failing fast when logged out.
    fn bearer_token(&self) -> Result<String> {
        self.credentials
            .bearer_token()
            .ok_or_else(|| MedichatError::unauthorized("no bearer credential available"))
    }

    /// Maps a non-success status onto the client error taxonomy.
    ///
    /// `entity_id` is the conversation the request addressed, when it
    /// addressed one; only those requests can produce `NotFound`.
    async fn check_status(response: Response, entity_id: Option<&str>) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::classify_status(status, &body, entity_id))
    }

    fn classify_status(status: StatusCode, body: &str, entity_id: Option<&str>) -> MedichatError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => MedichatError::unauthorized(
                format!("backend rejected credential ({})", status),
            ),
            // A 404 on a route that names no conversation is an unexpected
            // backend shape, not a missing entity.
            StatusCode::NOT_FOUND => match entity_id {
                Some(id) => MedichatError::not_found("conversation", id),
                None => MedichatError::network(format!("backend error ({}): {}", status, body)),
            },
            _ => MedichatError::network(format!("backend error ({}): {}", status, body)),
        }
    }

    fn transport_error(e: reqwest::Error) -> MedichatError {
        MedichatError::network(format!("request failed: {}", e))
    }
}

#[async_trait]
impl ConversationClient for HttpConversationClient {
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(self.url("/conversations"))
            .bearer_auth(token)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let response = Self::check_status(response, None).await?;
        let summaries: Vec<WireConversationSummary> = response
            .json()
            .await
            .map_err(|e| MedichatError::network(format!("invalid listing response: {}", e)))?;

        Ok(summaries.into_iter().map(Into::into).collect())
    }

    async fn get_conversation(&self, id: &str) -> Result<ConversationDetail> {
        let token = self.bearer_token()?;
        tracing::debug!(conversation_id = %id, "fetching conversation");
        let response = self
            .client
            .get(self.url(&format!("/conversations/{}", id)))
            .bearer_auth(token)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let response = Self::check_status(response, Some(id)).await?;
        let detail: WireConversationDetail = response
            .json()
            .await
            .map_err(|e| MedichatError::network(format!("invalid conversation response: {}", e)))?;

        Ok(detail.into())
    }

    async fn send_message(&self, request: SendMessageRequest) -> Result<SendMessageResponse> {
        let token = self.bearer_token()?;
        let conversation_id = request.conversation_id;
        tracing::debug!(
            conversation_id = ?conversation_id,
            "posting message to backend"
        );

        let builder = match request.payload {
            MessagePayload::Text(text) => self
                .client
                .post(self.url("/messages"))
                .bearer_auth(token)
                .json(&WireSendTextRequest {
                    conversation_id: conversation_id.clone(),
                    text,
                }),
            MessagePayload::Audio(bytes) => {
                let part = reqwest::multipart::Part::bytes(bytes)
                    .file_name(AUDIO_FILE_NAME)
                    .mime_str("audio/webm")
                    .map_err(|e| MedichatError::internal(e.to_string()))?;
                let mut form = reqwest::multipart::Form::new().part(AUDIO_FIELD, part);
                if let Some(id) = conversation_id.clone() {
                    form = form.text("conversation_id", id);
                }
                self.client
                    .post(self.url("/messages"))
                    .bearer_auth(token)
                    .multipart(form)
            }
        };

        let response = builder
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let response = Self::check_status(response, conversation_id.as_deref()).await?;
        let body: WireSendResponse = response
            .json()
            .await
            .map_err(|e| MedichatError::network(format!("invalid send response: {}", e)))?;

        Ok(SendMessageResponse {
            conversation_id: body.conversation_id,
            reply: body.reply.into(),
        })
    }

    async fn rename_conversation(&self, id: &str, title: &str) -> Result<()> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .patch(self.url(&format!("/conversations/{}", id)))
            .bearer_auth(token)
            .json(&WireRenameRequest {
                title: title.to_string(),
            })
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check_status(response, Some(id)).await?;
        Ok(())
    }

    async fn delete_conversation(&self, id: &str) -> Result<()> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .delete(self.url(&format!("/conversations/{}", id)))
            .bearer_auth(token)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check_status(response, Some(id)).await?;
        Ok(())
    }
}
