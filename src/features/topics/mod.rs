//! # Topics Feature
//!
//! Canned prompts to spark a debate when the user has nothing in mind.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

use rand::Rng;

pub const TOPICS: [&str; 8] = [
    "Is a hotdog a sandwich? Defend your answer.",
    "If AI becomes truly sentient, should it have the right to vote?",
    "Is time travel actually possible, or just a fun sci-fi concept?",
    "What is the most underrated invention in human history?",
    "If you had to live in a virtual reality simulation forever, what would it look like?",
    "Are humans fundamentally good or evil?",
    "What's the best way to survive a zombie apocalypse?",
    "Is water actually wet?",
];

/// Uniform pick from [`TOPICS`]
pub fn random_topic<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TOPICS[rng.random_range(0..TOPICS.len())]
}

/// [`random_topic`] with the thread-local generator
pub fn pick_random() -> &'static str {
    random_topic(&mut rand::rng())
}
