/// Pure string processing utilities (transport-agnostic)

/// Check if a string is empty after trimming
pub fn is_empty_or_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

/// Split a string by delimiter and trim each part, dropping empty entries
pub fn split_and_trim(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
