//! Environment configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file by the binary before [`Config::from_env`] runs.

use anyhow::{anyhow, Result};
use std::env::{self, VarError};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_APP_TITLE: &str = "AI Group Chat";
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Delays applied between turns and sweeps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingConfig {
    /// Reading time per published character
    pub per_char: Duration,
    pub min_read: Duration,
    pub max_read: Duration,
    /// Pause after a failed turn
    pub after_failure: Duration,
    /// Linger before an auto-continue sweep starts
    pub between_sweeps: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            per_char: Duration::from_millis(10),
            min_read: Duration::from_millis(1000),
            max_read: Duration::from_millis(3000),
            after_failure: Duration::from_millis(1500),
            between_sweeps: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub log_level: String,
    pub endpoint: String,
    pub app_title: String,
    pub max_tokens: u32,
    pub request_timeout: Duration,
    pub roster_path: Option<String>,
    pub auto_continue: bool,
    pub mock_latency: Duration,
    pub pacing: PacingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "roundtable.db".to_string(),
            log_level: "info".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout: Duration::from_secs(45),
            roster_path: None,
            auto_continue: false,
            mock_latency: Duration::from_millis(1500),
            pacing: PacingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let pacing = PacingConfig {
            per_char: env_millis("ROUNDTABLE_READ_MS_PER_CHAR", defaults.pacing.per_char)?,
            min_read: env_millis("ROUNDTABLE_MIN_READ_MS", defaults.pacing.min_read)?,
            max_read: env_millis("ROUNDTABLE_MAX_READ_MS", defaults.pacing.max_read)?,
            after_failure: env_millis("ROUNDTABLE_FAILURE_PAUSE_MS", defaults.pacing.after_failure)?,
            between_sweeps: env_millis("ROUNDTABLE_SWEEP_PAUSE_MS", defaults.pacing.between_sweeps)?,
        };

        let config = Config {
            database_path: env_var("DATABASE_PATH")?.unwrap_or(defaults.database_path),
            log_level: env_var("LOG_LEVEL")?.unwrap_or(defaults.log_level),
            endpoint: env_var("ROUNDTABLE_ENDPOINT")?.unwrap_or(defaults.endpoint),
            app_title: env_var("ROUNDTABLE_APP_TITLE")?.unwrap_or(defaults.app_title),
            max_tokens: match env_var("ROUNDTABLE_MAX_TOKENS")? {
                Some(raw) => u32::try_from(parse_number("ROUNDTABLE_MAX_TOKENS", &raw)?)
                    .map_err(|_| anyhow!("ROUNDTABLE_MAX_TOKENS is out of range: {raw}"))?,
                None => defaults.max_tokens,
            },
            request_timeout: match env_var("ROUNDTABLE_REQUEST_TIMEOUT_SECS")? {
                Some(raw) => Duration::from_secs(parse_number("ROUNDTABLE_REQUEST_TIMEOUT_SECS", &raw)?),
                None => defaults.request_timeout,
            },
            roster_path: env_var("ROUNDTABLE_ROSTER")?.filter(|p| !p.trim().is_empty()),
            auto_continue: match env_var("ROUNDTABLE_AUTO_CONTINUE")? {
                Some(raw) => parse_bool("ROUNDTABLE_AUTO_CONTINUE", &raw)?,
                None => defaults.auto_continue,
            },
            mock_latency: env_millis("ROUNDTABLE_MOCK_LATENCY_MS", defaults.mock_latency)?,
            pacing,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pacing.min_read > self.pacing.max_read {
            return Err(anyhow!(
                "ROUNDTABLE_MIN_READ_MS ({}ms) must not exceed ROUNDTABLE_MAX_READ_MS ({}ms)",
                self.pacing.min_read.as_millis(),
                self.pacing.max_read.as_millis()
            ));
        }
        if self.max_tokens == 0 {
            return Err(anyhow!("ROUNDTABLE_MAX_TOKENS must be greater than zero"));
        }
        if self.endpoint.trim().is_empty() {
            return Err(anyhow!("ROUNDTABLE_ENDPOINT must not be empty"));
        }
        Ok(())
    }
}

/// `None` only when the variable is unset; non-UTF-8 values are an error
fn env_var(name: &str) -> Result<Option<String>> {
    interpret_var(name, env::var(name))
}

fn interpret_var(name: &str, value: Result<String, VarError>) -> Result<Option<String>> {
    match value {
        Ok(raw) => Ok(Some(raw)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(anyhow!("{name} is not valid UTF-8: {raw:?}")),
    }
}

fn env_millis(name: &str, default: Duration) -> Result<Duration> {
    match env_var(name)? {
        Some(raw) => Ok(Duration::from_millis(parse_number(name, &raw)?)),
        None => Ok(default),
    }
}

pub(crate) fn parse_number(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| anyhow!("Invalid value for {name}: '{raw}' ({e})"))
}

pub(crate) fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("Invalid value for {name}: '{other}' (expected true/false)")),
    }
}
