//! # Providers Feature
//!
//! Produces a participant's reply from the shared history. The offline
//! mock keeps the whole engine usable without a credential; the remote
//! provider calls a chat-completions endpoint.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: ProviderSwitch picks mock or remote per call from the live credential
//! - 1.0.0: Initial release with mock and remote providers

use async_trait::async_trait;

use crate::core::ProviderError;
use crate::features::history::Turn;
use crate::features::participants::ParticipantId;

pub mod mock;
pub mod remote;
pub mod switch;

pub use mock::MockProvider;
pub use remote::{RemoteProvider, RemoteSettings};
pub use switch::{Credential, ProviderSwitch};

/// Generates one reply for `participant` given the history so far.
///
/// Calls are strictly serialized by the scheduler. Implementations own any
/// transport timeout; the scheduler never aborts a call.
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    async fn generate(
        &self,
        participant: &ParticipantId,
        history: &[Turn],
    ) -> Result<String, ProviderError>;

    /// Short label for log lines
    fn name(&self) -> &'static str;
}
