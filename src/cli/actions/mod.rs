pub mod auth;
pub mod resources;

mod run;

use crate::{api::ApiError, cli::globals::GlobalArgs};
use anyhow::{anyhow, Result};
use serde::Serialize;

#[derive(Debug)]
pub enum Action {
    Status,
    Auth(auth::Args),
    Resource(resources::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the configuration is invalid, the store cannot be
    /// read, or the request fails.
    pub async fn execute(self, globals: &GlobalArgs) -> Result<()> {
        run::execute(self, globals).await
    }
}

/// Writes `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Turns a failed request into the message shown to the user.
pub(crate) fn user_error(err: &ApiError) -> anyhow::Error {
    anyhow!(err.user_message(&err.to_string()))
}
