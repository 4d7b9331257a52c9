//! Append-only conversation log shared by every participant call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::features::participants::ParticipantId;

/// Informational turn left behind by [`ConversationHistory::reset`]
pub const RESET_MARKER: &str = "Discussion cleared. The table is yours.";

/// Who produced a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Speaker {
    User,
    Participant(ParticipantId),
    /// Informational marker, e.g. after a reset
    System,
}

/// One entry of the transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    speaker: Speaker,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Speaker::User, content)
    }

    pub fn participant(id: ParticipantId, content: impl Into<String>) -> Self {
        Self::new(Speaker::Participant(id), content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Speaker::System, content)
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_user(&self) -> bool {
        matches!(self.speaker, Speaker::User)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Owned copy for an in-flight provider call. Later appends are not visible through it.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Clear everything and leave a single [`RESET_MARKER`] turn.
    ///
    /// Callers must not reset while a sweep is running.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.turns.push(Turn::system(RESET_MARKER));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
