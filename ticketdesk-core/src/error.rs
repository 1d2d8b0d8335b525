//! Error taxonomy for account and ticket operations
//!
//! Every error here is recoverable: callers surface it to the user and
//! the store is left as it was before the failed operation.

use std::fmt;

use thiserror::Error;

use crate::ids::TicketId;

/// The underlying key-value store rejected or failed a write
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage quota exceeded writing {key} ({needed} bytes needed, quota {quota})")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    #[error("i/o failure on {key}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {key}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Form field a validation message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    Title,
    Status,
    Description,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::Title => "title",
            Field::Status => "status",
            Field::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single inline message attached to a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// All field errors found by one validation pass, in field order.
///
/// Validators check every field before returning, so this can hold
/// several entries at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for a field, if that field failed
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing failed
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Errors from signup and login
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid input: {0}")]
    Validation(FieldErrors),
    #[error("an account already exists for {email}")]
    Conflict { email: String },
    #[error("invalid credentials")]
    Auth,
    #[error("failed to persist account data")]
    Persistence(#[from] PersistenceError),
}

impl AccountError {
    /// Inline messages to show next to the form fields.
    ///
    /// Credential mismatches are pinned to the password field with a
    /// generic message so the form never reveals which field was wrong.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            AccountError::Validation(errors) => errors.clone(),
            AccountError::Conflict { .. } => {
                let mut errors = FieldErrors::new();
                errors.push(Field::Email, "Account already exists");
                errors
            }
            AccountError::Auth => {
                let mut errors = FieldErrors::new();
                errors.push(Field::Password, "Invalid credentials");
                errors
            }
            AccountError::Persistence(_) => FieldErrors::new(),
        }
    }
}

/// Errors from ticket operations
#[derive(Debug, Error)]
pub enum TicketError {
    #[error("invalid ticket: {0}")]
    Validation(FieldErrors),
    #[error("ticket {id} not found")]
    NotFound { id: TicketId },
    #[error("failed to persist tickets")]
    Persistence(#[from] PersistenceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_collects_in_order() {
        let mut errors = FieldErrors::new();
        errors.push(Field::Title, "Title is required.");
        errors.push(Field::Status, "Select a valid status.");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Status), Some("Select a valid status."));
        assert_eq!(errors.get(Field::Description), None);
        assert_eq!(
            errors.to_string(),
            "title: Title is required.; status: Select a valid status."
        );
    }

    #[test]
    fn test_empty_field_errors_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_auth_error_is_generic() {
        let inline = AccountError::Auth.field_errors();
        assert_eq!(inline.get(Field::Password), Some("Invalid credentials"));
        assert_eq!(inline.get(Field::Email), None);
    }
}
