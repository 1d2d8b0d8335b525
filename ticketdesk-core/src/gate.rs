//! Session gate for views that need a logged-in user

use std::sync::Arc;
use std::time::Duration;

use crate::account::AccountStore;
use crate::ports::{Navigator, Notifier, NotifyLevel};
use crate::routes;
use crate::types::Session;

/// Result of entering a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The view is public
    Open,
    /// The view is protected and a session exists
    Authorized(Session),
    /// No session; a redirect to the login view was scheduled
    Redirected,
}

/// Stateless guard over `AccountStore::current_session`
pub struct SessionGate {
    accounts: Arc<AccountStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    redirect_delay: Duration,
}

impl SessionGate {
    pub fn new(
        accounts: Arc<AccountStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            accounts,
            notifier,
            navigator,
            redirect_delay,
        }
    }

    /// Decide whether `path` may be shown
    pub fn enter(&self, path: &str) -> GateDecision {
        if !routes::requires_session(path) {
            return GateDecision::Open;
        }
        match self.require() {
            Some(session) => GateDecision::Authorized(session),
            None => GateDecision::Redirected,
        }
    }

    /// Session for a protected view. Without one, the user is told and
    /// sent to the login view once the message has had time to show.
    pub fn require(&self) -> Option<Session> {
        if let Some(session) = self.accounts.current_session() {
            return Some(session);
        }
        tracing::info!("no session, redirecting to login");
        self.notifier.notify(
            "Your session has expired — please log in again.",
            NotifyLevel::Error,
        );
        self.navigator
            .navigate_after(routes::LOGIN, self.redirect_delay);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Navigation, RecordingNavigator, RecordingNotifier};
    use crate::storage::{MemoryKvStore, StorageKeys};

    fn gate() -> (SessionGate, Arc<AccountStore>, Arc<RecordingNotifier>, Arc<RecordingNavigator>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let accounts = Arc::new(AccountStore::new(
            Arc::new(MemoryKvStore::new()),
            StorageKeys::default(),
            notifier.clone(),
            navigator.clone(),
        ));
        let gate = SessionGate::new(
            accounts.clone(),
            notifier.clone(),
            navigator.clone(),
            Duration::from_millis(700),
        );
        (gate, accounts, notifier, navigator)
    }

    #[test]
    fn test_public_view_is_open() {
        let (gate, _, notifier, _) = gate();
        assert_eq!(gate.enter(routes::LANDING), GateDecision::Open);
        assert_eq!(gate.enter(routes::LOGIN), GateDecision::Open);
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn test_protected_view_without_session_redirects() {
        let (gate, _, notifier, navigator) = gate();

        assert_eq!(gate.enter(routes::TICKETS), GateDecision::Redirected);
        assert_eq!(notifier.last().unwrap().level, NotifyLevel::Error);
        assert_eq!(
            navigator.navigations(),
            vec![Navigation {
                path: routes::LOGIN.into(),
                delay: Duration::from_millis(700),
            }]
        );
    }

    #[test]
    fn test_protected_view_with_session() {
        let (gate, accounts, _, navigator) = gate();
        let session = accounts
            .sign_up("Ada", "ada@example.com", "secret1")
            .unwrap();
        let before = navigator.navigations().len();

        assert_eq!(gate.enter(routes::DASHBOARD), GateDecision::Authorized(session));
        assert_eq!(navigator.navigations().len(), before);
    }
}
