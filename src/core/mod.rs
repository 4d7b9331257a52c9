//! # Core Module
//!
//! Configuration, error taxonomy and reply text utilities shared by every feature.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add error module with provider and configuration errors
//! - 1.0.0: Initial creation with config and response modules

pub mod config;
pub mod error;
pub mod response;

// Re-export commonly used items
pub use config::{Config, PacingConfig};
pub use error::{ConfigurationError, ProviderError};
pub use response::{
    attribute, is_blank, normalize_reply, preview, FAILURE_NOTICE, FALLBACK_REPLY, PREVIEW_LIMIT,
};
