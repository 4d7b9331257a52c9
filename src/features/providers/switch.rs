//! Credential-driven provider selection.
//!
//! The credential can change while the engine is running; each call reads
//! it afresh and routes to the remote provider when a key is present, to
//! the mock otherwise.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::sync::{Arc, PoisonError, RwLock};

use super::{MockProvider, RemoteProvider, RemoteSettings, ResponseProvider};
use crate::core::ProviderError;
use crate::features::history::Turn;
use crate::features::participants::{ParticipantId, ParticipantRegistry};

/// Shared, mutable API key
#[derive(Debug, Clone, Default)]
pub struct Credential {
    inner: Arc<RwLock<Option<String>>>,
}

impl Credential {
    pub fn new(value: Option<String>) -> Self {
        let credential = Self::default();
        credential.set(value);
        credential
    }

    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Blank values clear the credential
    pub fn set(&self, value: Option<String>) {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }
}

pub struct ProviderSwitch {
    credential: Credential,
    mock: MockProvider,
    client: Client,
    settings: RemoteSettings,
    registry: Arc<ParticipantRegistry>,
}

impl ProviderSwitch {
    pub fn new(
        credential: Credential,
        mock: MockProvider,
        client: Client,
        settings: RemoteSettings,
        registry: Arc<ParticipantRegistry>,
    ) -> Self {
        Self {
            credential,
            mock,
            client,
            settings,
            registry,
        }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Label of the provider the next call will use
    pub fn active(&self) -> &'static str {
        if self.credential.is_set() {
            "remote"
        } else {
            self.mock.name()
        }
    }
}

#[async_trait]
impl ResponseProvider for ProviderSwitch {
    async fn generate(
        &self,
        participant: &ParticipantId,
        history: &[Turn],
    ) -> Result<String, ProviderError> {
        match self.credential.get() {
            Some(api_key) => {
                let remote = RemoteProvider::new(
                    self.client.clone(),
                    api_key,
                    self.settings.clone(),
                    self.registry.clone(),
                );
                remote.generate(participant, history).await
            }
            None => {
                debug!("No credential configured, using mock reply for {participant}");
                self.mock.generate(participant, history).await
            }
        }
    }

    fn name(&self) -> &'static str {
        "switch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn switch(credential: Credential, endpoint: String) -> ProviderSwitch {
        ProviderSwitch::new(
            credential,
            MockProvider::new(Duration::ZERO),
            Client::new(),
            RemoteSettings {
                endpoint,
                ..RemoteSettings::default()
            },
            Arc::new(ParticipantRegistry::builtin()),
        )
    }

    #[test]
    fn test_credential_trims_and_clears() {
        let credential = Credential::new(Some("  key  ".to_string()));
        assert_eq!(credential.get(), Some("key".to_string()));

        credential.set(Some("   ".to_string()));
        assert!(!credential.is_set());
    }

    #[tokio::test]
    async fn test_without_credential_uses_mock() {
        let provider = switch(Credential::default(), "http://127.0.0.1:9/unused".to_string());
        assert_eq!(provider.active(), "mock");

        let chatgpt = ParticipantId::new("chatgpt");
        let reply = provider
            .generate(&chatgpt, &[Turn::user("Is water wet?")])
            .await
            .unwrap();
        assert_eq!(reply, MockProvider::reply(&chatgpt, true));
    }

    #[tokio::test]
    async fn test_credential_change_takes_effect_on_next_call() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-live")
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"content": "Live answer."}}]}"#)
            .create_async()
            .await;

        let credential = Credential::default();
        let provider = switch(
            credential.clone(),
            format!("{}/v1/chat/completions", server.url()),
        );
        let claude = ParticipantId::new("claude");
        let history = [Turn::user("Topic")];

        let offline = provider.generate(&claude, &history).await.unwrap();
        assert_eq!(offline, MockProvider::reply(&claude, true));

        credential.set(Some("sk-live".to_string()));
        assert_eq!(provider.active(), "remote");
        let online = provider.generate(&claude, &history).await.unwrap();
        assert_eq!(online, "Live answer.");
    }
}
