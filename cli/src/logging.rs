//! Tracing setup for the command line
//!
//! Logs go to stderr, and optionally to `ticketdesk.log` under
//! `PathManager::logs_dir()`.

use config::PathManager;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info,ticketdesk_core=info"
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// life of the process or buffered file output is lost.
pub fn init_logging(verbose: bool, log_to_file: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    let (file_layer, guard) = match log_to_file.then(file_writer).flatten() {
        Some((writer, guard)) => (
            Some(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn file_writer() -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let Some(dir) = PathManager::logs_dir() else {
        eprintln!("[ticketdesk] No log directory available, logging to stderr only");
        return None;
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("[ticketdesk] Failed to create log directory {:?}: {}", dir, e);
        return None;
    }
    let appender = tracing_appender::rolling::never(&dir, "ticketdesk.log");
    Some(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(false), "info,ticketdesk_core=info");
        assert_eq!(default_filter(true), "debug");
        assert!(EnvFilter::try_new(default_filter(false)).is_ok());
    }
}
