/// Longest prefix of `text` holding at most `max_chars` characters.
///
/// Cuts on a char boundary, so multi-byte input never panics.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Short preview of a message for reports, marked when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let head = truncate_chars(text, max_chars);
    if head.len() < text.len() {
        format!("{}...[truncated]", head)
    } else {
        head.to_string()
    }
}
