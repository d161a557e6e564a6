use crate::navigation::{Navigator, Route};
use tracing::info;

/// Terminal stand-in for a screen stack: a reset to the login entry tells the
/// user to sign in again.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliNavigator;

impl Navigator for CliNavigator {
    fn reset_to(&self, route: Route) {
        info!(%route, "navigation reset");
        if route == Route::Login {
            eprintln!("Signed out. Run `tracks login` to sign in again.");
        }
    }
}
