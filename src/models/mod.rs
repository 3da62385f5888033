pub mod attendance;
pub mod member;
pub mod name;
pub mod service;
pub mod service_type;
pub mod timefmt;
pub mod visitor;

/// Form inputs arrive as strings; blank means "not provided".
pub fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
