//! Ports that report through `tracing`

use std::time::Duration;

use super::{Navigator, Notifier, NotifyLevel};

/// Sends notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        match level {
            NotifyLevel::Info => tracing::info!(target: "notify", "{}", message),
            NotifyLevel::Error => tracing::error!(target: "notify", "{}", message),
        }
    }
}

/// Logs navigations instead of performing them
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate_after(&self, path: &str, delay: Duration) {
        tracing::info!(
            target: "navigate",
            path,
            delay_ms = delay.as_millis() as u64,
            "navigation scheduled"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_ports_accept_every_level() {
        let notifier = TracingNotifier;
        notifier.notify("Ticket created", NotifyLevel::Info);
        notifier.notify("Failed to save tickets", NotifyLevel::Error);

        TracingNavigator.navigate_after("/dashboard", Duration::from_millis(700));
    }
}
