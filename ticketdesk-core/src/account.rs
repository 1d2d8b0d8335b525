//! Account store: signup, login, logout and the session singleton
//!
//! Accounts live in the users slot as a JSON array; the session lives in
//! its own slot. The two are written independently, so a signup whose
//! session write fails still leaves the account in place.

use std::sync::Arc;

use crate::error::{AccountError, Field, FieldErrors, PersistenceError};
use crate::ports::{Navigator, Notifier, NotifyLevel};
use crate::routes::{self, NavigationDelays};
use crate::storage::{decode_records, encode_records, KeyValueStore, StorageKeys};
use crate::types::{Session, UserRecord};

const MIN_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 6;

/// Check signup input, reporting every failing field
fn validate_sign_up(name: &str, email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if name.chars().count() < MIN_NAME_CHARS {
        errors.push(Field::Name, "Please enter your full name");
    }
    if email.is_empty() {
        errors.push(Field::Email, "Email required");
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        errors.push(Field::Password, "Password must be at least 6 characters");
    }
    errors.into_result()
}

fn validate_log_in(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if email.is_empty() {
        errors.push(Field::Email, "Email is required");
    }
    if password.is_empty() {
        errors.push(Field::Password, "Password is required");
    }
    errors.into_result()
}

/// Owns the user collection and the session singleton
pub struct AccountStore {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    delays: NavigationDelays,
}

impl AccountStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        keys: StorageKeys,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            keys,
            notifier,
            navigator,
            delays: NavigationDelays::default(),
        }
    }

    pub fn with_delays(mut self, delays: NavigationDelays) -> Self {
        self.delays = delays;
        self
    }

    /// Register a new account and log it in.
    ///
    /// Name and email are trimmed before validation and storage. The
    /// password is kept exactly as given.
    pub fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AccountError> {
        let name = name.trim();
        let email = email.trim();
        validate_sign_up(name, email, password).map_err(AccountError::Validation)?;

        let mut users = self.users();
        if users.iter().any(|u| u.email_matches(email)) {
            tracing::info!(email, "signup rejected, account exists");
            self.notifier.notify("Account already exists", NotifyLevel::Error);
            return Err(AccountError::Conflict {
                email: email.to_string(),
            });
        }

        users.push(UserRecord {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
        if let Err(e) = self.save_users(&users) {
            tracing::error!(email, error = %e, "failed to persist new account");
            self.notifier.notify(
                "Failed to save account. Please check your browser settings.",
                NotifyLevel::Error,
            );
            return Err(e.into());
        }

        let session = Session::start(name, email);
        if let Err(e) = self.save_session(&session) {
            // The account exists either way; the user can log in manually.
            tracing::warn!(email, error = %e, "auto-login after signup not persisted");
        }

        tracing::info!(email, users = users.len(), "account created");
        self.notifier.notify("Account created. Redirecting...", NotifyLevel::Info);
        self.navigator
            .navigate_after(routes::DASHBOARD, self.delays.after_signup);
        Ok(session)
    }

    /// Authenticate against the stored accounts and start a session.
    ///
    /// Email matches case-insensitively, password exactly.
    pub fn log_in(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let email = email.trim();
        validate_log_in(email, password).map_err(AccountError::Validation)?;

        let users = self.users();
        let Some(user) = users
            .iter()
            .find(|u| u.email_matches(email) && u.password == password)
        else {
            tracing::info!(email, "login rejected");
            self.notifier
                .notify("Invalid credentials. Please try again.", NotifyLevel::Error);
            return Err(AccountError::Auth);
        };

        let session = Session::start(user.name.clone(), user.email.clone());
        if let Err(e) = self.save_session(&session) {
            tracing::error!(email, error = %e, "failed to persist session");
            self.notifier.notify(
                "Failed to start session. Please check your browser settings.",
                NotifyLevel::Error,
            );
            return Err(e.into());
        }

        tracing::info!(email = %user.email, "logged in");
        self.notifier
            .notify(&format!("Welcome back, {}!", user.name), NotifyLevel::Info);
        self.navigator
            .navigate_after(routes::DASHBOARD, self.delays.after_login);
        Ok(session)
    }

    /// End the current session, if any
    pub fn log_out(&self) {
        if let Err(e) = self.store.remove(&self.keys.session) {
            tracing::warn!(error = %e, "failed to remove session");
        }
        tracing::info!("logged out");
        self.notifier.notify("Logged out", NotifyLevel::Info);
        self.navigator
            .navigate_after(routes::LANDING, self.delays.after_logout);
    }

    /// The persisted session, or `None` when absent or unreadable
    pub fn current_session(&self) -> Option<Session> {
        let raw = self.store.get(&self.keys.session)?;
        match serde_json::from_slice(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(key = %self.keys.session, error = %e, "ignoring corrupt session");
                None
            }
        }
    }

    /// Every valid stored account. Malformed data reads as no accounts.
    pub fn users(&self) -> Vec<UserRecord> {
        let raw = self.store.get(&self.keys.users);
        match decode_records(raw.as_deref(), UserRecord::from_value) {
            Ok(decoded) => {
                if decoded.discarded > 0 {
                    tracing::warn!(discarded = decoded.discarded, "dropped malformed user records");
                }
                decoded.records
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.keys.users,
                    error = %e,
                    "user collection unreadable, treating as empty"
                );
                Vec::new()
            }
        }
    }

    fn save_users(&self, users: &[UserRecord]) -> Result<(), PersistenceError> {
        let bytes = encode_records(&self.keys.users, users)?;
        self.store.set(&self.keys.users, &bytes)
    }

    fn save_session(&self, session: &Session) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec(session).map_err(|source| PersistenceError::Encode {
            key: self.keys.session.clone(),
            source,
        })?;
        self.store.set(&self.keys.session, &bytes)
    }
}
