use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The server phrases its greeting as `Welcome <username>!`
const WELCOME_PATTERN: &str = r"Welcome ([A-Za-z0-9_]+)!";

/// Text returned by the protected endpoint, with the username pulled out of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecureGreeting {
    pub message: String,
    pub username: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl SecureGreeting {
    pub fn new(message: String) -> Self {
        let username = extract_username(&message);
        Self {
            message,
            username,
            fetched_at: Utc::now(),
        }
    }
}

/// First `Welcome <name>!` match in the message
pub fn extract_username(message: &str) -> Option<String> {
    Regex::new(WELCOME_PATTERN)
        .ok()?
        .captures(message)?
        .get(1)
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_username() {
        assert_eq!(extract_username("Welcome alice!").as_deref(), Some("alice"));
        assert_eq!(
            extract_username("Welcome bob_2! This is protected data. You are authenticated.")
                .as_deref(),
            Some("bob_2")
        );
        assert_eq!(extract_username("Hello there"), None);
        assert_eq!(extract_username("Welcome !"), None);
    }

    #[test]
    fn test_new_derives_username() {
        let greeting = SecureGreeting::new("Welcome alice!".to_string());
        assert_eq!(greeting.message, "Welcome alice!");
        assert_eq!(greeting.username.as_deref(), Some("alice"));
    }
}
