//! Ports that record what they were asked to do

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::{Confirmer, Navigator, Notifier, NotifyLevel};

/// A notification as it was delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
}

/// Keeps every notification in delivery order
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }

    /// Drain recorded notifications
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                message: message.to_string(),
                level,
            });
    }
}

/// A navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    pub delay: Duration,
}

/// Keeps every navigation request in order
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    entries: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigations(&self) -> Vec<Navigation> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_after(&self, path: &str, delay: Duration) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Navigation {
                path: path.to_string(),
                delay,
            });
    }
}

/// Answers prompts from a queue, then falls back to a fixed answer
#[derive(Debug)]
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    fallback: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn always(answer: bool) -> Self {
        Self::scripted([], answer)
    }

    pub fn scripted(answers: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            fallback,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, message: &str) -> bool {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_then_fallback() {
        let confirmer = ScriptedConfirmer::scripted([true, false], true);
        assert!(confirmer.confirm("one"));
        assert!(!confirmer.confirm("two"));
        assert!(confirmer.confirm("three"));
        assert_eq!(confirmer.prompts(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_notifier_take_drains() {
        let notifier = RecordingNotifier::new();
        notifier.notify("a", NotifyLevel::Info);
        notifier.notify("b", NotifyLevel::Error);

        assert_eq!(notifier.last().unwrap().level, NotifyLevel::Error);
        assert_eq!(notifier.take().len(), 2);
        assert!(notifier.notifications().is_empty());
    }
}
