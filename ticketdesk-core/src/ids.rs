//! Type-safe ID newtypes for persisted records
//!
//! Fresh IDs are a short prefix followed by a random UUID in simple form.
//! IDs loaded from storage are accepted as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to define a prefixed ID newtype
macro_rules! define_id {
    ($name:ident, $prefix:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix carried by every freshly generated value
            pub const PREFIX: &'static str = $prefix;

            /// Create a new random ID
            pub fn new() -> Self {
                Self(format!("{}{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Create from an existing string (for loading from storage)
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_id!(TicketId, "t_", "Unique identifier for a ticket, immutable after creation");
define_id!(
    SessionToken,
    "tok_",
    "Opaque session token. It carries no meaning and never expires; presence alone marks a login"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id1 = TicketId::new();
        let id2 = TicketId::new();
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("t_"));
    }

    #[test]
    fn test_token_prefix() {
        let token = SessionToken::new();
        assert!(token.as_str().starts_with(SessionToken::PREFIX));
        assert_eq!(token.as_str().len(), "tok_".len() + 32);
    }

    #[test]
    fn test_id_from_string() {
        // Legacy ids written by older clients keep their exact form
        let id = TicketId::from_string("t_k3j9x0a1");
        assert_eq!(id.as_str(), "t_k3j9x0a1");
        assert_eq!(format!("{}", id), "t_k3j9x0a1");
    }

    #[test]
    fn test_id_serde() {
        let id = TicketId::from_string("t_123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"t_123\"");

        let parsed: TicketId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
