//! Ticket store: CRUD over the persisted ticket collection
//!
//! Each mutation reads the whole collection, changes it in memory and
//! writes the whole collection back.

use std::sync::Arc;

use chrono::Utc;

use crate::error::TicketError;
use crate::ids::TicketId;
use crate::ports::{Confirmer, Notifier, NotifyLevel};
use crate::storage::{decode_records, encode_records, KeyValueStore, StorageKeys};
use crate::types::{Ticket, TicketDraft, TicketStats};

pub const DELETE_PROMPT: &str = "Delete this ticket? This action cannot be undone.";

/// What happened to a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; nothing changed
    Cancelled,
}

/// Owns the ticket collection
pub struct TicketStore {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
}

impl TicketStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        keys: StorageKeys,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            store,
            keys,
            notifier,
            confirmer,
        }
    }

    /// All tickets in insertion order.
    ///
    /// An unreadable collection yields no tickets and a load-error
    /// notification; entries that are not valid tickets are skipped.
    pub fn list(&self) -> Vec<Ticket> {
        let raw = self.store.get(&self.keys.tickets);
        match decode_records(raw.as_deref(), Ticket::from_value) {
            Ok(decoded) => {
                if decoded.discarded > 0 {
                    tracing::warn!(
                        discarded = decoded.discarded,
                        "dropped malformed ticket records"
                    );
                }
                decoded.records
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.keys.tickets,
                    error = %e,
                    "ticket collection unreadable"
                );
                self.notifier
                    .notify("Failed to load tickets. Please retry.", NotifyLevel::Error);
                Vec::new()
            }
        }
    }

    /// Look up one ticket
    pub fn get(&self, id: &TicketId) -> Option<Ticket> {
        self.list().into_iter().find(|t| t.id == *id)
    }

    pub fn create(&self, draft: &TicketDraft) -> Result<Ticket, TicketError> {
        let valid = draft.validate().map_err(TicketError::Validation)?;

        let now = Utc::now();
        let ticket = Ticket {
            id: TicketId::new(),
            title: valid.title,
            description: valid.description,
            status: valid.status,
            priority: valid.priority,
            created_at: now,
            updated_at: now,
        };

        let mut tickets = self.list();
        tickets.push(ticket.clone());
        self.save(&tickets)?;

        tracing::info!(id = %ticket.id, status = ticket.status.as_str(), "ticket created");
        self.notifier.notify("Ticket created", NotifyLevel::Info);
        Ok(ticket)
    }

    /// Replace every mutable field of an existing ticket
    pub fn update(&self, id: &TicketId, draft: &TicketDraft) -> Result<Ticket, TicketError> {
        let valid = draft.validate().map_err(TicketError::Validation)?;

        let mut tickets = self.list();
        let Some(ticket) = tickets.iter_mut().find(|t| t.id == *id) else {
            tracing::info!(%id, "update of missing ticket");
            self.notifier
                .notify("Failed to update: ticket not found", NotifyLevel::Error);
            return Err(TicketError::NotFound { id: id.clone() });
        };

        ticket.title = valid.title;
        ticket.description = valid.description;
        ticket.status = valid.status;
        ticket.priority = valid.priority;
        // Never let a clock step back place the update before creation
        ticket.updated_at = Utc::now().max(ticket.created_at);
        let updated = ticket.clone();

        self.save(&tickets)?;

        tracing::info!(%id, status = updated.status.as_str(), "ticket updated");
        self.notifier.notify("Ticket updated", NotifyLevel::Info);
        Ok(updated)
    }

    /// Delete a ticket after the user confirms
    pub fn delete(&self, id: &TicketId) -> Result<DeleteOutcome, TicketError> {
        if !self.confirmer.confirm(DELETE_PROMPT) {
            tracing::debug!(%id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let mut tickets = self.list();
        let Some(index) = tickets.iter().position(|t| t.id == *id) else {
            tracing::info!(%id, "delete of missing ticket");
            self.notifier.notify("Ticket not found", NotifyLevel::Error);
            return Err(TicketError::NotFound { id: id.clone() });
        };

        tickets.remove(index);
        self.save(&tickets)?;

        tracing::info!(%id, remaining = tickets.len(), "ticket deleted");
        self.notifier.notify("Ticket deleted", NotifyLevel::Info);
        Ok(DeleteOutcome::Deleted)
    }

    /// Counts derived from the current collection
    pub fn stats(&self) -> TicketStats {
        TicketStats::from_tickets(&self.list())
    }

    /// Fetch a ticket for the edit form
    pub fn load_into_form(&self, id: &TicketId) -> Result<Ticket, TicketError> {
        self.get(id).ok_or_else(|| {
            self.notifier.notify("Ticket not found", NotifyLevel::Error);
            TicketError::NotFound { id: id.clone() }
        })
    }

    /// Form submit: update when editing an existing ticket, create otherwise
    pub fn submit(
        &self,
        id: Option<&TicketId>,
        draft: &TicketDraft,
    ) -> Result<Ticket, TicketError> {
        match id {
            Some(id) => self.update(id, draft),
            None => self.create(draft),
        }
    }

    fn save(&self, tickets: &[Ticket]) -> Result<(), TicketError> {
        let result = encode_records(&self.keys.tickets, tickets)
            .and_then(|bytes| self.store.set(&self.keys.tickets, &bytes));
        if let Err(e) = result {
            tracing::error!(key = %self.keys.tickets, error = %e, "failed to persist tickets");
            self.notifier.notify(
                "Failed to save tickets. Please check your browser settings.",
                NotifyLevel::Error,
            );
            return Err(TicketError::Persistence(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;
    use crate::ports::{Notification, RecordingNotifier, ScriptedConfirmer};
    use crate::storage::MemoryKvStore;
    use crate::types::TicketStatus;

    struct Harness {
        store: Arc<MemoryKvStore>,
        notifier: Arc<RecordingNotifier>,
        confirmer: Arc<ScriptedConfirmer>,
        tickets: TicketStore,
    }

    fn harness_with(store: MemoryKvStore, confirm: bool) -> Harness {
        let store = Arc::new(store);
        let notifier = Arc::new(RecordingNotifier::new());
        let confirmer = Arc::new(ScriptedConfirmer::always(confirm));
        let tickets = TicketStore::new(
            store.clone(),
            StorageKeys::default(),
            notifier.clone(),
            confirmer.clone(),
        );
        Harness {
            store,
            notifier,
            confirmer,
            tickets,
        }
    }

    fn harness() -> Harness {
        harness_with(MemoryKvStore::new(), true)
    }

    fn draft(title: &str, status: &str) -> TicketDraft {
        TicketDraft::new(title, "", status, "medium")
    }

    #[test]
    fn test_create_appends_and_persists() {
        let h = harness();

        let first = h.tickets.create(&draft("Printer jam", "open")).unwrap();
        let second = h.tickets.create(&draft("VPN down", "in_progress")).unwrap();

        assert_eq!(first.created_at, first.updated_at);
        assert_ne!(first.id, second.id);
        assert_eq!(h.tickets.list(), vec![first, second]);
        assert_eq!(
            h.notifier.last(),
            Some(Notification {
                message: "Ticket created".into(),
                level: NotifyLevel::Info,
            })
        );
    }

    #[test]
    fn test_create_rejects_invalid_draft() {
        let h = harness();

        let err = h.tickets.create(&draft("", "waiting")).unwrap_err();
        let TicketError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
        assert!(errors.get(Field::Title).is_some());
        assert!(errors.get(Field::Status).is_some());
        assert!(h.tickets.list().is_empty());
        assert!(h.notifier.notifications().is_empty());
    }

    #[test]
    fn test_update_replaces_mutable_fields() {
        let h = harness();
        let created = h.tickets.create(&draft("Printer jam", "open")).unwrap();

        let updated = h
            .tickets
            .update(&created.id, &TicketDraft::new("Printer fixed", "toner", "closed", "low"))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.created_at);
        assert_eq!(updated.title, "Printer fixed");
        assert_eq!(updated.status, TicketStatus::Closed);
        assert_eq!(h.tickets.list(), vec![updated]);
    }

    #[test]
    fn test_update_missing_ticket() {
        let h = harness();
        h.tickets.create(&draft("Printer jam", "open")).unwrap();

        let err = h
            .tickets
            .update(&TicketId::from_string("t_gone"), &draft("x", "open"))
            .unwrap_err();
        assert!(matches!(err, TicketError::NotFound { .. }));
        assert_eq!(
            h.notifier.last().unwrap().message,
            "Failed to update: ticket not found"
        );
    }

    #[test]
    fn test_update_validates_before_lookup() {
        let h = harness();
        let err = h
            .tickets
            .update(&TicketId::from_string("t_gone"), &draft("", "open"))
            .unwrap_err();
        assert!(matches!(err, TicketError::Validation(_)));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let h = harness_with(MemoryKvStore::new(), false);
        let ticket = h.tickets.create(&draft("Printer jam", "open")).unwrap();

        let outcome = h.tickets.delete(&ticket.id).unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(h.tickets.list().len(), 1);
        assert_eq!(h.confirmer.prompts(), vec![DELETE_PROMPT]);
    }

    #[test]
    fn test_delete_removes_ticket() {
        let h = harness();
        let keep = h.tickets.create(&draft("Keep", "open")).unwrap();
        let drop = h.tickets.create(&draft("Drop", "open")).unwrap();

        assert_eq!(h.tickets.delete(&drop.id).unwrap(), DeleteOutcome::Deleted);
        assert_eq!(h.tickets.list(), vec![keep]);
        assert_eq!(h.notifier.last().unwrap().message, "Ticket deleted");
    }

    #[test]
    fn test_delete_missing_leaves_collection() {
        let h = harness();
        h.tickets.create(&draft("Keep", "open")).unwrap();
        let before = h.store.get("ticketapp_tickets");

        let err = h.tickets
            .delete(&TicketId::from_string("t_gone"))
            .unwrap_err();
        assert!(matches!(err, TicketError::NotFound { .. }));
        assert_eq!(h.store.get("ticketapp_tickets"), before);
    }

    #[test]
    fn test_corrupt_collection_lists_empty() {
        let h = harness();
        h.store.set("ticketapp_tickets", b"\"oops\"").unwrap();

        assert!(h.tickets.list().is_empty());
        assert_eq!(
            h.notifier.last().unwrap().message,
            "Failed to load tickets. Please retry."
        );
    }

    #[test]
    fn test_list_skips_invalid_entries() {
        let h = harness();
        h.store
            .set(
                "ticketapp_tickets",
                br#"[
                    {"id": "t_1", "title": "ok", "status": "open",
                     "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z"},
                    {"id": "t_2", "title": "bad", "status": "pending",
                     "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z"},
                    42
                ]"#,
            )
            .unwrap();

        let tickets = h.tickets.list();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].id.as_str(), "t_1");
        assert!(h.notifier.notifications().is_empty());
    }

    #[test]
    fn test_write_failure_reports_persistence_error() {
        let h = harness_with(MemoryKvStore::with_quota(32), true);

        let err = h.tickets.create(&draft("Printer jam", "open")).unwrap_err();
        assert!(matches!(err, TicketError::Persistence(_)));
        assert!(h.tickets.list().is_empty());
        assert_eq!(h.notifier.last().unwrap().level, NotifyLevel::Error);
    }

    #[test]
    fn test_stats_counts_by_status() {
        let h = harness();
        for status in ["open", "closed", "open", "in_progress"] {
            h.tickets.create(&draft("t", status)).unwrap();
        }
        assert_eq!(
            h.tickets.stats(),
            TicketStats {
                total: 4,
                open: 2,
                closed: 1
            }
        );
    }

    #[test]
    fn test_load_into_form_and_submit() {
        let h = harness();
        let created = h.tickets
            .submit(None, &draft("Printer jam", "open"))
            .unwrap();

        let loaded = h.tickets.load_into_form(&created.id).unwrap();
        let mut form = TicketDraft::from(&loaded);
        form.status = "closed".into();

        let updated = h.tickets.submit(Some(&created.id), &form).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.priority, "medium");
        assert_eq!(h.tickets.list().len(), 1);

        let missing = h.tickets.load_into_form(&TicketId::from_string("t_gone"));
        assert!(matches!(missing, Err(TicketError::NotFound { .. })));
        assert_eq!(h.notifier.last().unwrap().message, "Ticket not found");
    }
}
