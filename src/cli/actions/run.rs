use crate::{
    api::ApiClient,
    cli::{
        actions::{auth, print_json, resources, Action},
        globals::GlobalArgs,
        navigator::CliNavigator,
    },
    features::auth::AuthSession,
    store::{CredentialStore, FileStore},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

/// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    let config = globals.config().context("invalid configuration")?;
    debug!(
        api_url = %config.api_base_url,
        store = %config.store_path.display(),
        timeout_ms = globals.timeout_ms,
        "starting"
    );

    let store: Arc<dyn CredentialStore> = Arc::new(FileStore::new(config.store_path.clone()));
    let api = ApiClient::new(config, store, Arc::new(CliNavigator))?;
    let mut session = AuthSession::restore(api)
        .await
        .context("could not read the credential store")?;

    match action {
        Action::Status => status(&session),
        Action::Auth(args) => auth::execute(args, &mut session).await,
        Action::Resource(args) => resources::execute(args, &session).await,
    }
}

fn status(session: &AuthSession) -> Result<()> {
    let config = session.api().config();
    print_json(&serde_json::json!({
        "api_url": config.api_base_url,
        "store": config.store_path.display().to_string(),
        "authenticated": session.is_authenticated(),
        "registration": session.registration_stage(),
        "login": session.login_stage(),
    }))
}
