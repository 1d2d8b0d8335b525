//! Ticket records, form drafts and derived views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Field, FieldErrors};
use crate::ids::TicketId;

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Priority shown in the edit form when a ticket has none
pub const DEFAULT_PRIORITY: &str = "low";

/// Lifecycle state of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Closed,
    ];

    /// Parse the stored/form representation (`open`, `in_progress`, `closed`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(TicketStatus::Open),
            "in_progress" => Some(TicketStatus::InProgress),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Closed => "closed",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In progress",
            TicketStatus::Closed => "Closed",
        }
    }
}

/// A persisted ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Decode one stored entry, rejecting anything that breaks the
    /// record invariants (unknown status, blank title, bad timestamps).
    pub fn from_value(value: Value) -> Option<Self> {
        let ticket: Ticket = serde_json::from_value(value).ok()?;
        if ticket.title.trim().is_empty() {
            return None;
        }
        Some(ticket)
    }
}

/// Raw ticket form input, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    /// Status exactly as submitted; checked against the valid values
    pub status: String,
    pub priority: String,
}

/// A draft that passed validation
#[derive(Debug, Clone)]
pub(crate) struct ValidDraft {
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: String,
}

impl TicketDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: status.into(),
            priority: priority.into(),
        }
    }

    /// Check every field and collect all failures
    pub(crate) fn validate(&self) -> Result<ValidDraft, FieldErrors> {
        let title = self.title.trim();
        let description = self.description.trim();
        let status = TicketStatus::parse(&self.status);

        let mut errors = FieldErrors::new();
        if title.is_empty() {
            errors.push(Field::Title, "Title is required.");
        }
        if status.is_none() {
            errors.push(Field::Status, "Select a valid status.");
        }
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            errors.push(Field::Description, "Description is too long.");
        }

        match status {
            Some(status) if errors.is_empty() => Ok(ValidDraft {
                title: title.to_string(),
                description: description.to_string(),
                status,
                priority: self.priority.clone(),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Ticket> for TicketDraft {
    /// Fill the edit form from a stored ticket
    fn from(ticket: &Ticket) -> Self {
        let priority = if ticket.priority.is_empty() {
            DEFAULT_PRIORITY.to_string()
        } else {
            ticket.priority.clone()
        };
        Self {
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status.as_str().to_string(),
            priority,
        }
    }
}

/// Aggregate counts for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        Self {
            total: tickets.len(),
            open: tickets
                .iter()
                .filter(|t| t.status == TicketStatus::Open)
                .count(),
            closed: tickets
                .iter()
                .filter(|t| t.status == TicketStatus::Closed)
                .count(),
        }
    }
}

/// Display order: most recently created first
pub fn newest_first(tickets: &[Ticket]) -> Vec<&Ticket> {
    tickets.iter().rev().collect()
}
