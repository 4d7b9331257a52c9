//! # Participants Feature
//!
//! Static, ordered roster of roundtable participants.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: YAML roster overrides
//! - 1.0.0: Initial release

pub mod registry;

pub use registry::{Participant, ParticipantId, ParticipantRegistry};
