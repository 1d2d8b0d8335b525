//! Ports backed by the terminal

use std::io::{self, BufRead, Write};
use std::time::Duration;

use ticketdesk_core::{Confirmer, Navigator, Notifier, NotifyLevel};

/// Prints notifications to stderr
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        match level {
            NotifyLevel::Info => eprintln!("{}", message),
            NotifyLevel::Error => eprintln!("error: {}", message),
        }
    }
}

/// There are no pages to switch to, so navigations are only announced
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate_after(&self, path: &str, delay: Duration) {
        eprintln!("→ {} (after {} ms)", path, delay.as_millis());
    }
}

/// Asks on stderr and reads `y`/`yes` from stdin; anything else is a no
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{} [y/N] ", message);
        io::stderr().flush().ok();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation");
                false
            }
        }
    }
}
