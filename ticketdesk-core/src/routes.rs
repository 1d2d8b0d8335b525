//! Page paths and navigation timing

use std::time::Duration;

pub const LANDING: &str = "/";
pub const LOGIN: &str = "/auth/login";
pub const SIGNUP: &str = "/auth/signup";
pub const DASHBOARD: &str = "/dashboard";
pub const TICKETS: &str = "/tickets";

/// Views that need a session
pub const PROTECTED: [&str; 2] = [DASHBOARD, TICKETS];

pub fn requires_session(path: &str) -> bool {
    PROTECTED.contains(&path)
}

/// How long each navigation waits so its notification can be read first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationDelays {
    pub after_login: Duration,
    pub after_signup: Duration,
    pub gate_redirect: Duration,
    pub after_logout: Duration,
}

impl Default for NavigationDelays {
    fn default() -> Self {
        Self {
            after_login: Duration::from_millis(600),
            after_signup: Duration::from_millis(700),
            gate_redirect: Duration::from_millis(700),
            after_logout: Duration::from_millis(400),
        }
    }
}
