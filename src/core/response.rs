//! Reply text utilities
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Fallback substitution and speaker attribution moved here from the engine
//! - 1.0.0: UTF-8 safe previews for log lines

/// Published in place of a blank reply. Never empty.
pub const FALLBACK_REPLY: &str = "I'm still processing that. I agree with the points made.";

/// Shown to the sink when a participant's call fails. Never persisted.
pub const FAILURE_NOTICE: &str = "*System Error: Failed to connect.*";

/// Default preview length for log lines
pub const PREVIEW_LIMIT: usize = 80;

/// True when the text is empty or contains only whitespace
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Apply the fallback policy: blank replies become [`FALLBACK_REPLY`].
///
/// Non-blank replies are returned as-is, including surrounding whitespace,
/// so the published text is exactly what the provider produced.
pub fn normalize_reply(text: &str) -> String {
    if is_blank(text) {
        FALLBACK_REPLY.to_string()
    } else {
        text.to_string()
    }
}

/// Compose the persisted content of a participant turn.
///
/// Later participants only see plain text, so the speaker's identity is
/// carried inline.
pub fn attribute(display_name: &str, text: &str) -> String {
    format!("{display_name} said: {text}")
}

/// Truncate text to at most `limit` bytes on a char boundary, adding an ellipsis
pub fn preview(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }

    let mut end = limit.saturating_sub(3);
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
