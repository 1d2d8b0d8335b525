//! Record types
//!
//! Shared types persisted by the stores and returned to callers.

pub mod session;
pub mod ticket;
pub mod user;

// Re-exports for convenience
pub use session::{Session, SessionUser};
pub use ticket::{newest_first, Ticket, TicketDraft, TicketStats, TicketStatus};
pub use user::UserRecord;
