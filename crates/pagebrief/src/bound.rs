//! Text bounding
//!
//! Completion models accept a limited amount of input, so cleaned text is
//! cut to a fixed character budget before prompting.

/// Marker appended when content is cut at the character budget
pub const TRUNCATION_MARKER: &str = "...\n[Content truncated]";

/// Text guaranteed to fit the configured character budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedText {
    pub content: String,
    pub was_truncated: bool,
}

/// Truncate `content` to at most `max_chars` characters
///
/// Counts characters, not bytes. When the budget applies, the fixed marker
/// is appended to the truncated prefix.
pub fn bound(content: &str, max_chars: usize) -> BoundedText {
    if content.chars().count() <= max_chars {
        return BoundedText {
            content: content.to_string(),
            was_truncated: false,
        };
    }

    let mut truncated: String = content.chars().take(max_chars).collect();
    truncated.push_str(TRUNCATION_MARKER);

    BoundedText {
        content: truncated,
        was_truncated: true,
    }
}
