/// Truncate a string to a maximum number of characters, adding ellipsis if
/// needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Render a boolean as the check/cross marks used in todo tables
pub fn completion_mark(completed: bool) -> &'static str {
    if completed {
        "✅"
    } else {
        "❌"
    }
}
