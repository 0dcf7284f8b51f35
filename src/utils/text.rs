//! Text helpers for card and feedback rendering

/// Shorten `text` to at most `max_chars` characters, appending "..." when cut
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", text[..end].trim_end()),
        None => text.to_string(),
    }
}
