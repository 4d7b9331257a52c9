//! Readability pacing between turns.

use std::time::Duration;

use crate::core::PacingConfig;

#[derive(Debug, Clone, Default)]
pub struct Pacing {
    config: PacingConfig,
}

impl Pacing {
    pub fn new(config: PacingConfig) -> Self {
        Self { config }
    }

    /// `clamp(chars * per_char, min_read, max_read)`
    pub fn reading_time(&self, text: &str) -> Duration {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        self.config
            .per_char
            .saturating_mul(chars)
            .max(self.config.min_read)
            .min(self.config.max_read)
    }

    pub fn after_failure(&self) -> Duration {
        self.config.after_failure
    }

    pub fn between_sweeps(&self) -> Duration {
        self.config.between_sweeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_uses_minimum() {
        let pacing = Pacing::default();
        assert_eq!(pacing.reading_time(""), Duration::from_millis(1000));
        assert_eq!(pacing.reading_time("Agreed."), Duration::from_millis(1000));
    }

    #[test]
    fn test_scales_with_length() {
        let pacing = Pacing::default();
        assert_eq!(pacing.reading_time(&"a".repeat(150)), Duration::from_millis(1500));
    }

    #[test]
    fn test_long_text_capped() {
        let pacing = Pacing::default();
        assert_eq!(pacing.reading_time(&"a".repeat(10_000)), Duration::from_millis(3000));
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let pacing = Pacing::default();
        // 200 chars, 600 bytes
        assert_eq!(pacing.reading_time(&"世".repeat(200)), Duration::from_millis(2000));
    }

    #[test]
    fn test_fixed_pauses() {
        let pacing = Pacing::default();
        assert_eq!(pacing.after_failure(), Duration::from_millis(1500));
        assert_eq!(pacing.between_sweeps(), Duration::from_millis(1000));
    }
}
