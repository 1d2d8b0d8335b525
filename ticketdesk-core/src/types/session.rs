//! The session singleton

use serde::{Deserialize, Serialize};

use crate::ids::SessionToken;

/// Display fields of the logged-in user, copied from the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub name: String,
    pub email: String,
}

/// Proof that a user is logged in. Persisted as `{token, user: {name, email}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: SessionToken,
    pub user: SessionUser,
}

impl Session {
    /// Start a session with a fresh token
    pub fn start(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: SessionToken::new(),
            user: SessionUser {
                name: name.into(),
                email: email.into(),
            },
        }
    }
}
