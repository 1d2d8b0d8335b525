//! Wires the stores and the gate over one key-value store

use std::sync::Arc;

use crate::account::AccountStore;
use crate::gate::SessionGate;
use crate::ports::Ports;
use crate::routes::NavigationDelays;
use crate::storage::{KeyValueStore, StorageKeys};
use crate::tickets::TicketStore;

/// Knobs shared by all components
#[derive(Debug, Clone, Default)]
pub struct DeskOptions {
    pub keys: StorageKeys,
    pub delays: NavigationDelays,
}

/// Account store, ticket store and session gate sharing one backend
pub struct TicketDesk {
    accounts: Arc<AccountStore>,
    tickets: TicketStore,
    gate: SessionGate,
}

impl TicketDesk {
    pub fn new(store: Arc<dyn KeyValueStore>, ports: Ports, options: DeskOptions) -> Self {
        let accounts = Arc::new(
            AccountStore::new(
                store.clone(),
                options.keys.clone(),
                ports.notifier.clone(),
                ports.navigator.clone(),
            )
            .with_delays(options.delays),
        );
        let tickets = TicketStore::new(
            store,
            options.keys,
            ports.notifier.clone(),
            ports.confirmer,
        );
        let gate = SessionGate::new(
            accounts.clone(),
            ports.notifier,
            ports.navigator,
            options.delays.gate_redirect,
        );
        Self {
            accounts,
            tickets,
            gate,
        }
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn tickets(&self) -> &TicketStore {
        &self.tickets
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }
}
