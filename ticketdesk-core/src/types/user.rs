//! User credential records

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored account.
///
/// The password is kept and compared in plaintext; this store offers no
/// real security and is only meant for a single local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserRecord {
    /// Decode one stored entry.
    ///
    /// Entries without string `email` and `password` are rejected. A
    /// missing or non-string `name` decodes as empty.
    pub fn from_value(value: Value) -> Option<Self> {
        let email = value.get("email")?.as_str()?.to_string();
        let password = value.get("password")?.as_str()?.to_string();
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(Self {
            name,
            email,
            password,
        })
    }

    /// Case-insensitive email comparison
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_valid_entry() {
        let user = UserRecord::from_value(json!({
            "name": "Ada", "email": "ada@example.com", "password": "secret1"
        }))
        .unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_decode_rejects_missing_credentials() {
        assert!(UserRecord::from_value(json!({"name": "x", "email": "a@b"})).is_none());
        assert!(UserRecord::from_value(json!({"email": 5, "password": "p"})).is_none());
        assert!(UserRecord::from_value(json!(null)).is_none());
        assert!(UserRecord::from_value(json!("a@b")).is_none());
    }

    #[test]
    fn test_decode_tolerates_missing_name() {
        let user = UserRecord::from_value(json!({"email": "a@b", "password": "pw"}))
            .unwrap();
        assert_eq!(user.name, "");
    }

    #[test]
    fn test_email_matches_ignores_case() {
        let user = UserRecord {
            name: "Ada".into(),
            email: "Ada@Example.com".into(),
            password: "secret1".into(),
        };
        assert!(user.email_matches("ada@example.COM"));
        assert!(!user.email_matches("ada@example.org"));
    }
}
