/// Validate a required text field with a max length (in characters).
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional email: empty is OK, otherwise must contain '@' and '.'.
pub fn validate_optional_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    }
    None
}

/// Parse a required id from a `<select>` value.
pub fn parse_id(value: &str, field_name: &str) -> Result<i64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field_name} is required"));
    }
    trimmed
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| format!("{field_name} is not valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required() {
        assert_eq!(validate_required("  ", "First name", 100), Some("First name is required".to_string()));
        assert_eq!(validate_required("Ama", "First name", 100), None);
        assert!(validate_required(&"x".repeat(101), "First name", 100).is_some());
    }

    #[test]
    fn optional_email() {
        assert_eq!(validate_optional_email(""), None);
        assert_eq!(validate_optional_email("ama@example.org"), None);
        assert!(validate_optional_email("ama.example.org").is_some());
        assert!(validate_optional_email("ama@example").is_some());
    }

    #[test]
    fn ids() {
        assert_eq!(parse_id("12", "Service"), Ok(12));
        assert_eq!(parse_id("", "Service"), Err("Service is required".to_string()));
        assert!(parse_id("abc", "Service").is_err());
        assert!(parse_id("0", "Service").is_err());
    }
}
