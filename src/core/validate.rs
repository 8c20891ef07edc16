// src/core/validate.rs

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::{ToolError, ToolResult};

// Statically compiled input patterns.
static RE_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$").unwrap());
static RE_IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$").unwrap()
});
static RE_IPV6: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$").unwrap());

/// Returns the trimmed value, or `message` as a validation error when it is blank.
pub fn required<'a>(value: &'a str, message: &str) -> ToolResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ToolError::validation(message))
    } else {
        Ok(trimmed)
    }
}

pub fn email(value: &str) -> ToolResult<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(ToolError::validation("Please enter a valid email address"));
    }
    Ok(trimmed)
}

pub fn domain(value: &str) -> ToolResult<&str> {
    let trimmed = required(value, "Please enter a domain name")?;
    if !RE_DOMAIN.is_match(trimmed) {
        return Err(ToolError::validation(
            "Please enter a valid domain name (e.g., example.com)",
        ));
    }
    Ok(trimmed)
}

pub fn is_valid_ip(value: &str) -> bool {
    RE_IPV4.is_match(value) || RE_IPV6.is_match(value)
}

pub fn ip(value: &str) -> ToolResult<&str> {
    let trimmed = required(value, "Please enter an IP address")?;
    if !is_valid_ip(trimmed) {
        return Err(ToolError::validation("Invalid IP address format"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected_with_their_message() {
        let err = required("   ", "Please enter a URL to analyze").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a URL to analyze");
        assert_eq!(required("  x ", "unused").unwrap(), "x");
    }

    #[test]
    fn email_needs_an_at_sign() {
        assert!(email("user@example.com").is_ok());
        assert_eq!(
            email("user.example.com").unwrap_err().to_string(),
            "Please enter a valid email address"
        );
        assert!(email("").is_err());
    }

    #[test]
    fn domain_pattern() {
        assert_eq!(domain(" example.com ").unwrap(), "example.com");
        assert!(domain("my-site.io").is_ok());
        assert!(domain("sub.example.com").is_err());
        assert!(domain("-bad.com").is_err());
        assert!(domain("example").is_err());
        assert_eq!(domain("").unwrap_err().to_string(), "Please enter a domain name");
    }

    #[test]
    fn ip_formats() {
        assert!(is_valid_ip("8.8.8.8"));
        assert!(is_valid_ip("255.255.255.255"));
        assert!(!is_valid_ip("256.1.1.1"));
        assert!(!is_valid_ip("1.2.3"));
        assert!(is_valid_ip("2001:0db8:85a3:0000:0000:8a2e:0370:7334"));
        // Compressed IPv6 is not accepted.
        assert!(!is_valid_ip("2001:db8::1"));
        assert_eq!(ip("nope").unwrap_err().to_string(), "Invalid IP address format");
    }
}
