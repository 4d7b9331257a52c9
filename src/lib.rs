// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Infrastructure - credential persistence
pub mod database;

// Re-export core config for binaries
pub use core::Config;

// Re-export feature items used by front ends
pub use features::{
    // History
    ConversationHistory, Turn,
    // Participants
    Participant, ParticipantId, ParticipantRegistry,
    // Providers
    Credential, MockProvider, ProviderSwitch, RemoteSettings, ResponseProvider,
    // Roundtable
    ChannelSink, Pacing, PresentationSink, RejectReason, Roundtable, RoundtableEvent, Submission,
};

pub use database::{CredentialStore, Database};
