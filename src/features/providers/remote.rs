//! Chat-completions provider.
//!
//! One POST per call. The whole history travels with every request: user
//! turns as `user`, everything else as `assistant`, behind a persona system
//! instruction for the speaking participant.

use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::ResponseProvider;
use crate::core::config::{DEFAULT_APP_TITLE, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS};
use crate::core::{preview, ProviderError};
use crate::features::history::Turn;
use crate::features::participants::{Participant, ParticipantId, ParticipantRegistry};

/// Endpoint details shared by every remote call
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub endpoint: String,
    pub app_title: String,
    pub max_tokens: u32,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Build the shared HTTP client. The timeout is the only deadline a call has.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("roundtable/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[derive(Clone)]
pub struct RemoteProvider {
    client: Client,
    api_key: String,
    settings: RemoteSettings,
    registry: Arc<ParticipantRegistry>,
}

impl RemoteProvider {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        settings: RemoteSettings,
        registry: Arc<ParticipantRegistry>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            settings,
            registry,
        }
    }

    fn build_request(&self, participant: &Participant, history: &[Turn]) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage {
            role: "system",
            content: participant.persona_prompt(),
        });
        messages.extend(history_as_role_pairs(history));

        ChatCompletionRequest {
            model: participant.backend_model_ref.clone(),
            messages,
            max_tokens: self.settings.max_tokens,
        }
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.api_key)
            .header("X-Title", &self.settings.app_title)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Transport(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    ProviderError::Transport(format!("could not connect to endpoint: {e}"))
                } else {
                    ProviderError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(map_http_error(status.as_u16(), &body_text));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(format!("failed to read response body: {e}")))?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body_text)
            .map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ResponseProvider for RemoteProvider {
    async fn generate(
        &self,
        participant: &ParticipantId,
        history: &[Turn],
    ) -> Result<String, ProviderError> {
        let participant = self
            .registry
            .lookup(participant)
            .map_err(|_| ProviderError::UnknownParticipant(participant.clone()))?;

        let request = self.build_request(participant, history);
        info!(
            "🤖 Requesting {} reply | Model: {} | History messages: {}",
            participant.display_name,
            request.model,
            history.len()
        );

        let start = Instant::now();
        let result = self.send_request(&request).await;
        match &result {
            Ok(text) => debug!(
                "✅ {} replied in {}ms: '{}'",
                participant.display_name,
                start.elapsed().as_millis(),
                preview(text, 60)
            ),
            Err(e) => error!(
                "❌ {} request failed after {}ms: {e}",
                participant.display_name,
                start.elapsed().as_millis()
            ),
        }
        result
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Map transcript turns to chat roles
pub fn history_as_role_pairs(history: &[Turn]) -> Vec<ChatMessage> {
    history
        .iter()
        .map(|turn| ChatMessage {
            role: if turn.is_user() { "user" } else { "assistant" },
            content: turn.content().to_string(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, ProviderError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedPayload("response has no choices".to_string()))?;

    // A null content is an empty reply, left to the fallback policy
    Ok(choice.message.content.unwrap_or_default())
}

fn map_http_error(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| preview(body, 200));

    ProviderError::Status { status, message }
}
