//! Error taxonomy for the roundtable engine
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! Provider failures are recovered per turn by the scheduler and never
//! escape a sweep chain. Configuration errors describe a broken roster and
//! are reported at load time or, for a lookup, to the caller of that lookup.

use thiserror::Error;

use crate::features::participants::ParticipantId;

/// Failure of a single response generation call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection, TLS, timeout or body read failure
    #[error("transport failure: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success status
    #[error("endpoint returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Success status but the body was not a usable completion
    #[error("malformed completion payload: {0}")]
    MalformedPayload(String),

    /// The participant id is not part of the provider's roster
    #[error("participant '{0}' is not registered")]
    UnknownParticipant(ParticipantId),
}

/// Roster defects. These are bugs in configuration, not runtime conditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("participant '{0}' not found in registry")]
    UnknownParticipant(ParticipantId),

    #[error("participant '{0}' is registered more than once")]
    DuplicateParticipant(ParticipantId),

    #[error("roster must contain at least one participant")]
    EmptyRoster,

    #[error("invalid {field} for participant '{id}': {reason}")]
    InvalidField {
        id: String,
        field: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ProviderError::Status {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "endpoint returned HTTP 429: rate limited");
    }

    #[test]
    fn test_configuration_error_message() {
        let err = ConfigurationError::UnknownParticipant(ParticipantId::new("ghost"));
        assert_eq!(err.to_string(), "participant 'ghost' not found in registry");
    }
}
