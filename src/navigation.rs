//! Navigation seam used for forced sign-out.
//!
//! The API client never renders anything; when a session cannot be recovered
//! it asks the embedder to reset its screen stack to a single entry.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login entry point, the only entry after a forced sign-out.
    Login,
    /// Signed-in entry point.
    Home,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("Login"),
            Self::Home => f.write_str("Home"),
        }
    }
}

pub trait Navigator: Send + Sync {
    /// Discards the current stack and makes `route` its only entry.
    fn reset_to(&self, route: Route);
}

/// Navigator for embedders without a screen stack.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn reset_to(&self, route: Route) {
        tracing::debug!("navigation reset to {route} ignored");
    }
}
