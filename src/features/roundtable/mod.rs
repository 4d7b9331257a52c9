//! # Roundtable Feature
//!
//! Turn scheduler for the group chat. A user message starts a sweep chain
//! where every participant replies in roster order, paced for reading,
//! optionally looping under auto-continue until stopped.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Busy-state and sweep events for richer presentation
//! - 1.1.0: Auto-continue with cooperative stop
//! - 1.0.0: Initial release with single-sweep scheduling

pub mod engine;
pub mod events;
pub mod pacing;

pub use engine::{
    ChainSummary, RejectReason, Roundtable, Submission, CONTINUATION_PROMPT, STOP_NOTICE,
};
pub use events::{ChannelSink, PresentationSink, RoundtableEvent};
pub use pacing::Pacing;
