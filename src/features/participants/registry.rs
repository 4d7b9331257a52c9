//! # Feature: Participant Registry
//!
//! The fixed, ordered roster of roundtable participants. Each participant
//! has a display name, a backend model reference and a persona prompt.
//! The built-in roster can be replaced by a YAML file at startup.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Roster overrides loaded from YAML with validation
//! - 1.1.0: Per-participant persona prompt override
//! - 1.0.0: Initial release with the four built-in participants

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::core::ConfigurationError;

/// Stable identity of a participant within a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "model")]
    pub backend_model_ref: String,
    /// Replaces the default persona prompt when set
    #[serde(default, rename = "persona", skip_serializing_if = "Option::is_none")]
    pub persona_override: Option<String>,
}

impl Participant {
    pub fn new(id: &str, display_name: &str, backend_model_ref: &str) -> Self {
        Self {
            id: ParticipantId::new(id),
            display_name: display_name.to_string(),
            backend_model_ref: backend_model_ref.to_string(),
            persona_override: None,
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona_override = Some(persona.into());
        self
    }

    /// System instruction sent ahead of the shared history
    pub fn persona_prompt(&self) -> String {
        if let Some(custom) = &self.persona_override {
            return custom.clone();
        }

        format!(
            "You are {name}, an AI assistant. You are participating in a group chat with a User \
             and other AIs. Keep your responses relatively concise, conversational, and stay in \
             character. Speak naturally as your specific AI persona. Do not write responses or \
             dialogues on behalf of other AIs.",
            name = self.display_name
        )
    }
}

/// Roster file layout
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RosterFile {
    participants: Vec<Participant>,
}

/// Ordered, immutable participant list. Order is the speaking order of every sweep.
#[derive(Debug, Clone)]
pub struct ParticipantRegistry {
    participants: Vec<Participant>,
}

impl Default for ParticipantRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ParticipantRegistry {
    /// The four built-in participants, in speaking order
    pub fn builtin() -> Self {
        Self {
            participants: vec![
                Participant::new("chatgpt", "ChatGPT", "openai/gpt-4o-mini"),
                Participant::new("claude", "Claude", "anthropic/claude-3-haiku"),
                Participant::new("gemini", "Gemini", "google/gemini-2.5-flash"),
                Participant::new("grok", "Grok", "nvidia/nemotron-3-nano-30b-a3b:free"),
            ],
        }
    }

    /// Build a registry from an explicit roster, rejecting duplicates and blank fields
    pub fn new(participants: Vec<Participant>) -> Result<Self, ConfigurationError> {
        let registry = Self { participants };
        registry.validate()?;
        Ok(registry)
    }

    /// Load a roster from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file {path}"))?;
        Self::from_yaml(&contents).with_context(|| format!("Invalid roster in {path}"))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let roster: RosterFile = serde_yaml::from_str(contents)?;
        Ok(Self::new(roster.participants)?)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.participants.is_empty() {
            return Err(ConfigurationError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for participant in &self.participants {
            let id = participant.id.as_str();

            if id.is_empty()
                || !id
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
            {
                return Err(ConfigurationError::InvalidField {
                    id: id.to_string(),
                    field: "id",
                    reason: "must be lowercase ascii letters, digits, '_' or '-'".to_string(),
                });
            }
            if participant.display_name.trim().is_empty() {
                return Err(ConfigurationError::InvalidField {
                    id: id.to_string(),
                    field: "name",
                    reason: "must not be empty".to_string(),
                });
            }
            if participant.backend_model_ref.trim().is_empty() {
                return Err(ConfigurationError::InvalidField {
                    id: id.to_string(),
                    field: "model",
                    reason: "must not be empty".to_string(),
                });
            }
            if !seen.insert(id) {
                return Err(ConfigurationError::DuplicateParticipant(participant.id.clone()));
            }
        }
        Ok(())
    }

    pub fn list(&self) -> &[Participant] {
        &self.participants
    }

    pub fn lookup(&self, id: &ParticipantId) -> Result<&Participant, ConfigurationError> {
        self.participants
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| ConfigurationError::UnknownParticipant(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
