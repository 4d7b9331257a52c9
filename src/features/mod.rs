//! # Features
//!
//! Each feature lives in its own directory with a versioned module header.

pub mod history;
pub mod participants;
pub mod providers;
pub mod roundtable;
pub mod topics;

// History
pub use history::{ConversationHistory, Speaker, Turn, RESET_MARKER};

// Participants
pub use participants::{Participant, ParticipantId, ParticipantRegistry};

// Providers
pub use providers::{
    Credential, MockProvider, ProviderSwitch, RemoteProvider, RemoteSettings, ResponseProvider,
};

// Roundtable
pub use roundtable::{
    ChainSummary, ChannelSink, Pacing, PresentationSink, RejectReason, Roundtable,
    RoundtableEvent, Submission, CONTINUATION_PROMPT, STOP_NOTICE,
};

// Topics
pub use topics::{pick_random, random_topic, TOPICS};
