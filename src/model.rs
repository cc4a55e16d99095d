//! User record model
//!
//! Defines the persisted user entity and the email validity rule applied
//! before records are accepted into the store.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Accepts `local@domain.tld` shaped addresses: a non-empty local part, an
/// `@`, and a dotted domain whose labels neither start nor end with a hyphen.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

/// A user record persisted in the backing store
///
/// The email address is the unique identifier and the partition key; it is
/// the only field consulted for equality and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Email address identifying the record
    #[serde(default)]
    pub email: String,
    /// Given name; empty when the payload omits it
    #[serde(rename = "firstname", default)]
    pub first_name: String,
    /// Family name; empty when the payload omits it
    #[serde(rename = "lastname", default)]
    pub last_name: String,
}

impl User {
    /// Create a new user record
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Check whether `email` is a syntactically well-formed address
///
/// An empty string is never valid.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_addresses() {
        for email in [
            "a@b.com",
            "first.last@example.org",
            "user+tag@mail.example.co.uk",
            "x_y-z@sub.domain.io",
            "digits123@numbers99.net",
        ] {
            assert!(is_valid_email(email), "should accept {}", email);
        }
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for email in [
            "",
            "not-an-email",
            "missing-domain@",
            "@missing-local.com",
            "no-tld@domain",
            "spaces in@local.com",
            "two@@ats.com",
            "bad@-leading-hyphen.com",
        ] {
            assert!(!is_valid_email(email), "should reject {}", email);
        }
    }

    #[test]
    fn test_user_json_field_names() {
        let user = User::new("a@b.com", "A", "B");
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"firstname\":\"A\""));
        assert!(json.contains("\"lastname\":\"B\""));
        assert!(json.contains("\"email\":\"a@b.com\""));
    }

    #[test]
    fn test_user_json_round_trip() {
        let user = User::new("a@b.com", "A", "B");
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
