//! Collaborator interfaces consumed by the stores
//!
//! The stores never talk to a UI directly. Notifications, confirmations
//! and navigations go through these traits, so the same core runs behind
//! a terminal, a headless service, or a test harness.

mod logging;
mod recording;

use std::sync::Arc;
use std::time::Duration;

pub use logging::{TracingNavigator, TracingNotifier};
pub use recording::{
    Navigation, Notification, RecordingNavigator, RecordingNotifier, ScriptedConfirmer,
};

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Error,
}

/// Fire-and-forget notification sink
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: NotifyLevel);
}

/// Synchronous yes/no prompt
pub trait Confirmer: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Schedules a page transition. There is no cancellation and the store
/// never observes whether it happened.
pub trait Navigator: Send + Sync {
    fn navigate_after(&self, path: &str, delay: Duration);
}

/// The full set of collaborators, shared by every store
#[derive(Clone)]
pub struct Ports {
    pub notifier: Arc<dyn Notifier>,
    pub confirmer: Arc<dyn Confirmer>,
    pub navigator: Arc<dyn Navigator>,
}

impl Ports {
    /// Ports that log through `tracing` and decline every confirmation
    pub fn headless() -> Self {
        Self {
            notifier: Arc::new(TracingNotifier),
            confirmer: Arc::new(ScriptedConfirmer::always(false)),
            navigator: Arc::new(TracingNavigator),
        }
    }
}
