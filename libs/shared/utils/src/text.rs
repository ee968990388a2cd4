/// Returns at most `max_chars` characters of `input`, cut on a char boundary.
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &input[..byte_idx],
        None => input,
    }
}

/// Like [`truncate_chars`] but appends `...` when something was cut.
pub fn ellipsize(input: &str, max_chars: usize) -> String {
    let truncated = truncate_chars(input, max_chars);
    if truncated.len() < input.len() {
        format!("{}...", truncated)
    } else {
        truncated.to_string()
    }
}

pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}
