//! The one place where a combined `name` column meets the
//! `first_name` / `last_name` application model.

/// Split a combined name: first whitespace token is the first name, the rest
/// (joined by single spaces, possibly empty) is the last name.
pub fn split_name(name: &str) -> (String, String) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Recombine first and last name for storage: single separating space, trimmed.
pub fn join_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

/// Name shown in lists and the activity feed.
/// "first last", or just "first" without a last name, or "Unknown" without a first name.
pub fn display_name(first: &str, last: &str) -> String {
    let first = first.trim();
    let last = last.trim();
    match (first.is_empty(), last.is_empty()) {
        (false, false) => format!("{first} {last}"),
        (false, true) => first.to_string(),
        _ => "Unknown".to_string(),
    }
}
