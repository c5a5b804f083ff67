//! Cleaning of user-generated form fields before they reach the store.

/// Maximum characters in a topic title.
pub const TITLE_MAX_LEN: usize = 100;
/// Maximum characters in a message body.
pub const CONTENT_MAX_LEN: usize = 300;
/// Maximum characters in an author or username.
pub const NAME_MAX_LEN: usize = 50;

/// Trims the input and cuts it down to `max_len` characters.
/// Returns None if nothing is left after trimming.
pub fn clean_required(input: &str, max_len: usize) -> Option<String> {
    let clean = input.trim();

    if clean.is_empty() {
        return None;
    }

    Some(truncate_chars(clean, max_len))
}

/// Same as `clean_required`, for fields which may be absent from the form entirely.
pub fn clean_optional(input: Option<&str>, max_len: usize) -> Option<String> {
    input.and_then(|s| clean_required(s, max_len))
}

/// Truncates on character boundaries, never splitting a code point.
pub fn truncate_chars(input: &str, max_len: usize) -> String {
    match input.char_indices().nth(max_len) {
        Some((byte_pos, _)) => input[..byte_pos].to_owned(),
        None => input.to_owned(),
    }
}
