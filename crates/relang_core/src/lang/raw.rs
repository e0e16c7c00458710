//! Raw block delimiters.
//!
//! A raw block embeds already-rendered target source. The front-end captures it together with its delimiters; the
//! builder strips them before the text reaches the model.

/// Opening and closing delimiter of a raw block.
pub const RAW_BLOCK_DELIMITER: &str = "```";

/// Strip the raw-block delimiters from captured text.
///
/// ## Returns
/// - `Some(inner)` when `text` starts and ends with [`RAW_BLOCK_DELIMITER`] (the two may not overlap).
/// - `None` otherwise.
///
/// ## Examples
/// ```rust
/// use relang_core::lang::raw::strip_delimiters;
///
/// assert_eq!(strip_delimiters("```int x;```"), Some("int x;"));
/// assert_eq!(strip_delimiters("int x;"), None);
/// ```
pub fn strip_delimiters(text: &str) -> Option<&str> {
    if text.len() < 2 * RAW_BLOCK_DELIMITER.len() {
        return None;
    }
    text.strip_prefix(RAW_BLOCK_DELIMITER)?.strip_suffix(RAW_BLOCK_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_keeps_inner_text_verbatim() {
        assert_eq!(strip_delimiters("```\n  #define X 1\n```"), Some("\n  #define X 1\n"));
    }

    #[test]
    fn test_strip_empty_block() {
        assert_eq!(strip_delimiters("``````"), Some(""));
    }

    #[test]
    fn test_strip_rejects_overlapping_delimiters() {
        assert_eq!(strip_delimiters("````"), None);
        assert_eq!(strip_delimiters("```"), None);
    }

    #[test]
    fn test_strip_rejects_missing_delimiter() {
        assert_eq!(strip_delimiters("```abc"), None);
        assert_eq!(strip_delimiters("abc```"), None);
    }
}
