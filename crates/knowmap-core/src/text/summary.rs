//! Display-safe truncation used when no summarization service answers.

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Truncate `text` to at most `max_length` characters, preferring a word
/// boundary, and append [`ELLIPSIS`] when anything was cut.
///
/// Text that already fits is returned unchanged. Otherwise the first
/// `max_length` characters are cut back to the last whitespace; if there is
/// no whitespace after the first character the cut is made at `max_length`.
///
/// ```
/// use knowmap_core::generate_summary;
///
/// assert_eq!(generate_summary("hello world foo", 8), "hello...");
/// assert_eq!(generate_summary("abcdefghij", 5), "abcde...");
/// assert_eq!(generate_summary("short", 10), "short");
/// ```
pub fn generate_summary(text: &str, max_length: usize) -> String {
    let Some(cut) = char_boundary(text, max_length) else {
        return text.to_string();
    };

    let truncated = &text[..cut];
    let last_space = truncated
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i);

    match last_space {
        Some(pos) if pos > 0 => format!("{}{}", &truncated[..pos], ELLIPSIS),
        _ => format!("{}{}", truncated, ELLIPSIS),
    }
}

/// Hard-cut preview of note content for list views.
///
/// Unlike [`generate_summary`] this does not look for a word boundary.
pub fn content_preview(content: &str) -> String {
    match char_boundary(content, crate::defaults::CONTENT_PREVIEW_LENGTH) {
        Some(cut) => format!("{}{}", &content[..cut], ELLIPSIS),
        None => content.to_string(),
    }
}

/// Byte offset of the `max_chars`-th character, or `None` when the text has
/// no more than `max_chars` characters.
fn char_boundary(text: &str, max_chars: usize) -> Option<usize> {
    let mut indices = text.char_indices().map(|(i, _)| i);
    let cut = indices.nth(max_chars)?;
    Some(cut)
}
