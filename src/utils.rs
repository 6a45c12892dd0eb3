//! Small string helpers shared by the fetcher and the logging calls.

/// Return at most the first `max` characters of `s`.
///
/// Counts Unicode scalar values, so the cut never lands inside a multi-byte
/// character. Strings already within the limit are returned whole.
pub fn take_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let head = take_chars(s, max);
    if head.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", head, s.len() - head.len())
    }
}

/// Mask an API key so it can appear in debug output.
pub fn redact(key: &str) -> String {
    let shown = take_chars(key, 4);
    if shown.len() == key.len() {
        "****".to_string()
    } else {
        format!("{shown}****")
    }
}
