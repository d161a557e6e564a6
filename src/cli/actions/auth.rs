use crate::{
    cli::actions::{print_json, user_error},
    features::auth::AuthSession,
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

#[derive(Debug)]
pub enum Args {
    Register { email: String, username: String },
    VerifyRegistration { code: String },
    SetPassword { password: SecretString, confirm: SecretString },
    Login { username: String, password: SecretString },
    VerifyLogin { code: String },
    Logout,
}

/// Runs one step of the registration or login flow and prints what comes next.
/// # Errors
/// Returns the user-facing message of the failed step.
pub async fn execute(args: Args, session: &mut AuthSession) -> Result<()> {
    let next = match args {
        Args::Register { email, username } => {
            session.register(&email, &username).await.map_err(|e| user_error(&e))?;
            Some("verify-registration")
        }
        Args::VerifyRegistration { code } => {
            session
                .verify_registration_code(&code)
                .await
                .map_err(|e| user_error(&e))?;
            Some("set-password")
        }
        Args::SetPassword { password, confirm } => {
            session
                .set_password(password.expose_secret(), confirm.expose_secret())
                .await
                .map_err(|e| user_error(&e))?;
            None
        }
        Args::Login { username, password } => {
            session
                .login(&username, password.expose_secret())
                .await
                .map_err(|e| user_error(&e))?;
            Some("verify-login")
        }
        Args::VerifyLogin { code } => {
            session.verify_login_code(&code).await.map_err(|e| user_error(&e))?;
            None
        }
        Args::Logout => {
            session.logout().await.map_err(|e| user_error(&e))?;
            None
        }
    };

    print_json(&json!({
        "authenticated": session.is_authenticated(),
        "registration": session.registration_stage(),
        "login": session.login_stage(),
        "next": next,
    }))
}
