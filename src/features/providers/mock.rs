//! Offline provider with canned, persona-flavored lines.

use async_trait::async_trait;
use log::debug;
use std::time::Duration;
use tokio::time::sleep;

use super::ResponseProvider;
use crate::core::ProviderError;
use crate::features::history::Turn;
use crate::features::participants::ParticipantId;

/// Deterministic stand-in used when no credential is configured.
///
/// The reply depends only on the participant id and whether the history
/// holds exactly one turn (the opening of a conversation).
#[derive(Debug, Clone)]
pub struct MockProvider {
    latency: Duration,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl MockProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn reply(participant: &ParticipantId, is_opening_turn: bool) -> String {
        let line = match (participant.as_str(), is_opening_turn) {
            ("chatgpt", true) => "Hello! I've analyzed your prompt. I'm ready to assist.",
            ("claude", true) => {
                "I agree with ChatGPT, but let's consider the ethical implications before we execute on that."
            }
            ("gemini", true) => {
                "I'm compiling the raw data now. Claude makes a fair point, but efficiency is key here."
            }
            ("grok", true) => {
                "You are all being extremely boring. Let's just launch it and see what breaks. 🚀"
            }
            ("chatgpt", false) => "My previous calculations suggest we follow a methodical approach.",
            ("claude", false) => "Let's make sure we are aligned on the core values here.",
            ("gemini", false) => {
                "I can process this multimodally if you all just pass me the context length."
            }
            ("grok", false) => "I'm just going to ignore the context window and post a meme.",
            (other, true) => {
                return format!("{other} here. I've read the prompt and I'm ready to weigh in.")
            }
            (other, false) => {
                return format!("{other} here. I've been listening and I'd like to build on that.")
            }
        };
        line.to_string()
    }
}

#[async_trait]
impl ResponseProvider for MockProvider {
    async fn generate(
        &self,
        participant: &ParticipantId,
        history: &[Turn],
    ) -> Result<String, ProviderError> {
        let is_opening_turn = history.len() == 1;
        debug!(
            "Mock reply for {participant} (opening: {is_opening_turn}, history: {})",
            history.len()
        );

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        Ok(Self::reply(participant, is_opening_turn))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::is_blank;
    use crate::features::participants::ParticipantRegistry;

    #[test]
    fn test_reply_is_pure() {
        for participant in ParticipantRegistry::builtin().list() {
            for opening in [true, false] {
                assert_eq!(
                    MockProvider::reply(&participant.id, opening),
                    MockProvider::reply(&participant.id, opening)
                );
            }
        }
    }

    #[test]
    fn test_opening_differs_from_follow_up() {
        let grok = ParticipantId::new("grok");
        assert_ne!(MockProvider::reply(&grok, true), MockProvider::reply(&grok, false));
        assert!(MockProvider::reply(&grok, true).contains("launch it"));
    }

    #[test]
    fn test_never_blank() {
        let ids = ["chatgpt", "claude", "gemini", "grok", "custom_guest"];
        for id in ids {
            for opening in [true, false] {
                assert!(!is_blank(&MockProvider::reply(&ParticipantId::new(id), opening)));
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_uses_history_length() {
        let provider = MockProvider::default();
        let claude = ParticipantId::new("claude");

        let opening = vec![Turn::user("Is water wet?")];
        let reply = provider.generate(&claude, &opening).await.unwrap();
        assert_eq!(reply, MockProvider::reply(&claude, true));

        let later = vec![Turn::user("Is water wet?"), Turn::user("Continue.")];
        let reply = provider.generate(&claude, &later).await.unwrap();
        assert_eq!(reply, MockProvider::reply(&claude, false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_waits_for_latency() {
        let provider = MockProvider::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();
        provider
            .generate(&ParticipantId::new("gemini"), &[Turn::user("hi")])
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
