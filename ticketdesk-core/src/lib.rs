//! Core of the ticket desk: accounts, sessions and tickets over a local
//! key-value store
//!
//! This crate provides:
//! - **Storage**: `KeyValueStore` trait with `MemoryKvStore` and `FsKvStore` backends
//! - **Accounts**: `AccountStore` for signup, login, logout and the session singleton
//! - **Tickets**: `TicketStore` for CRUD and derived statistics
//! - **Gate**: `SessionGate` guarding views that need a session
//! - **Ports**: `Notifier`, `Confirmer`, `Navigator` collaborator traits
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ticketdesk_core::{DeskOptions, MemoryKvStore, Ports, TicketDesk, TicketDraft};
//!
//! let desk = TicketDesk::new(
//!     Arc::new(MemoryKvStore::new()),
//!     Ports::headless(),
//!     DeskOptions::default(),
//! );
//! desk.accounts().sign_up("Ada", "ada@example.com", "secret1")?;
//! desk.tickets().create(&TicketDraft::new("Printer jam", "", "open", "low"))?;
//! ```
pub mod account;
pub mod desk;
pub mod error;
pub mod gate;
pub mod ids;
pub mod ports;
pub mod routes;
pub mod storage;
pub mod tickets;
pub mod types;

pub use account::AccountStore;
pub use desk::{DeskOptions, TicketDesk};
pub use error::{AccountError, Field, FieldError, FieldErrors, PersistenceError, TicketError};
pub use gate::{GateDecision, SessionGate};
pub use ids::{SessionToken, TicketId};
pub use ports::{Confirmer, Navigator, Notifier, NotifyLevel, Ports};
pub use routes::NavigationDelays;
pub use storage::{FsKvStore, KeyValueStore, MemoryKvStore, StorageKeys};
pub use tickets::{DeleteOutcome, TicketStore};
pub use types::{Session, SessionUser, Ticket, TicketDraft, TicketStats, TicketStatus, UserRecord};
