//! # Roundtable Events
//!
//! Everything the engine tells its presentation layer. The sink only
//! consumes; it never writes engine state.

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::features::participants::ParticipantId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoundtableEvent {
    /// A sweep chain began; input should be disabled
    GenerationStarted { stop_visible: bool },
    /// The user's turn was appended
    UserMessageAppended { content: String },
    /// A pass over the roster began (1-based within the chain)
    SweepStarted { sweep: usize },
    TypingStarted {
        participant_id: ParticipantId,
        display_name: String,
    },
    /// Un-prefixed reply text for display
    MessageDelivered {
        participant_id: ParticipantId,
        display_name: String,
        text: String,
    },
    /// Transient failure notice. Not part of the history.
    TurnFailed {
        participant_id: ParticipantId,
        display_name: String,
        message: String,
    },
    TypingStopped { participant_id: ParticipantId },
    StopVisibilityChanged { visible: bool },
    /// Informational line for the transcript
    SystemNotice { text: String },
    /// Terminal cleanup ran; input is available again
    GenerationFinished,
    /// History was reset and now holds only `marker`
    Cleared { marker: String },
}

pub trait PresentationSink: Send + Sync {
    fn emit(&self, event: RoundtableEvent);
}

/// Forwards events to an unbounded channel consumed elsewhere
#[derive(Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<RoundtableEvent>,
}

impl ChannelSink {
    pub fn channel() -> (Self, UnboundedReceiver<RoundtableEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl PresentationSink for ChannelSink {
    fn emit(&self, event: RoundtableEvent) {
        if let Err(e) = self.sender.send(event) {
            debug!("Presentation sink closed, dropping {:?}", e.0);
        }
    }
}
