//! Slot names for the persisted collections

/// Keys of the three persisted slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub session: String,
    pub users: String,
    pub tickets: String,
}

impl StorageKeys {
    pub const DEFAULT_NAMESPACE: &'static str = "ticketapp";

    /// Keys of the form `{namespace}_session`, `{namespace}_users`, `{namespace}_tickets`
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            session: format!("{namespace}_session"),
            users: format!("{namespace}_users"),
            tickets: format!("{namespace}_tickets"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_namespace(Self::DEFAULT_NAMESPACE)
    }
}
