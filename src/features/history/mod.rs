//! # History Feature
//!
//! Append-only transcript shared by the user and every participant.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod store;

pub use store::{ConversationHistory, Speaker, Turn, RESET_MARKER};
