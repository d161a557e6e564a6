//! Auth session state. `AuthSession` is created once at startup from the
//! durable store and passed to whoever drives the auth flows; it replaces any
//! ambient global auth context. Only the authenticated flag, flow stages and
//! short-lived step tokens live in memory; the credential pair is written
//! straight to the store and never kept here.
//!
//! Flow Overview: registration runs `register` → `verify_registration_code` →
//! `set_password`; login runs `login` → `verify_login_code`. Every step validates
//! locally first, then calls the API, then commits its state. A failed step
//! commits nothing, so the previous step token stays usable for a retry.

use crate::{
    api::{ApiClient, ApiError},
    features::auth::{
        client,
        types::{
            CredentialPair, LoginRequest, LoginVerifyRequest, PasswordSetRequest,
            RegistrationRequest, RegistrationVerifyRequest,
        },
        validation,
    },
    navigation::Route,
    store::StoreKey,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStage {
    #[default]
    Idle,
    Started,
    CodeVerified,
    PasswordSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginStage {
    #[default]
    Idle,
    Started,
    LoggedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Restore,
    Register,
    VerifyRegistration,
    SetPassword,
    Login,
    VerifyLogin,
    Logout,
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Restore => "restore",
            Self::Register => "register",
            Self::VerifyRegistration => "verify_registration",
            Self::SetPassword => "set_password",
            Self::Login => "login",
            Self::VerifyLogin => "verify_login",
            Self::Logout => "logout",
        };
        f.write_str(name)
    }
}

/// Last failure of a flow step, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowError {
    pub step: FlowStep,
    pub message: String,
    pub status: Option<u16>,
}

impl FlowError {
    fn new(step: FlowStep, err: &ApiError) -> Self {
        Self {
            step,
            message: err.user_message(&err.to_string()),
            status: err.status(),
        }
    }
}

pub struct AuthSession {
    api: ApiClient,
    is_authenticated: bool,
    reg_token: Option<SecretString>,
    login_token: Option<SecretString>,
    registration: RegistrationStage,
    login: LoginStage,
    last_error: Option<FlowError>,
}

impl AuthSession {
    /// Loads the session from the store. The user counts as authenticated iff
    /// a refresh token is stored; pending step tokens are picked up so a flow
    /// interrupted mid-verification can continue.
    ///
    /// # Errors
    /// Returns `ApiError::Store` if the store cannot be read.
    pub async fn restore(api: ApiClient) -> Result<Self, ApiError> {
        let store = api.store().clone();
        let is_authenticated = store.contains(StoreKey::RefreshToken).await?;
        let reg_token = store.get(StoreKey::RegToken).await?;
        let login_token = store.get(StoreKey::LoginToken).await?;

        debug!(
            is_authenticated,
            pending_registration = reg_token.is_some(),
            pending_login = login_token.is_some(),
            "session restored"
        );

        Ok(Self {
            registration: if reg_token.is_some() {
                RegistrationStage::Started
            } else {
                RegistrationStage::Idle
            },
            login: if login_token.is_some() {
                LoginStage::Started
            } else {
                LoginStage::Idle
            },
            api,
            is_authenticated,
            reg_token,
            login_token,
            last_error: None,
        })
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    #[must_use]
    pub fn registration_stage(&self) -> RegistrationStage {
        self.registration
    }

    #[must_use]
    pub fn login_stage(&self) -> LoginStage {
        self.login
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&FlowError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    #[must_use]
    pub fn has_pending_registration(&self) -> bool {
        self.reg_token.is_some()
    }

    #[must_use]
    pub fn has_pending_login(&self) -> bool {
        self.login_token.is_some()
    }

    /// Registration step 1: exchanges email and username for a `reg_token`.
    ///
    /// # Errors
    /// Validation, HTTP, network or store errors; recorded in `last_error`.
    #[instrument(skip_all)]
    pub async fn register(&mut self, email: &str, username: &str) -> Result<(), ApiError> {
        self.last_error = None;
        let result = self.try_register(email, username).await;
        self.record(FlowStep::Register, result)
    }

    /// Registration step 2: confirms the emailed code.
    ///
    /// # Errors
    /// Validation, HTTP, network or store errors; recorded in `last_error`.
    #[instrument(skip_all)]
    pub async fn verify_registration_code(&mut self, code: &str) -> Result<(), ApiError> {
        self.last_error = None;
        let result = self.try_verify_registration_code(code).await;
        self.record(FlowStep::VerifyRegistration, result)
    }

    /// Registration step 3: sets the password and signs the user in.
    ///
    /// # Errors
    /// Validation, HTTP, network or store errors; recorded in `last_error`.
    #[instrument(skip_all)]
    pub async fn set_password(&mut self, password: &str, password2: &str) -> Result<(), ApiError> {
        self.last_error = None;
        let result = self.try_set_password(password, password2).await;
        self.record(FlowStep::SetPassword, result)
    }

    /// Login step 1: exchanges username and password for a `login_token`.
    ///
    /// # Errors
    /// Validation, HTTP, network or store errors; recorded in `last_error`.
    #[instrument(skip_all)]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        self.last_error = None;
        let result = self.try_login(username, password).await;
        self.record(FlowStep::Login, result)
    }

    /// Login step 2: confirms the code and signs the user in.
    ///
    /// # Errors
    /// Validation, HTTP, network or store errors; recorded in `last_error`.
    #[instrument(skip_all)]
    pub async fn verify_login_code(&mut self, code: &str) -> Result<(), ApiError> {
        self.last_error = None;
        let result = self.try_verify_login_code(code).await;
        self.record(FlowStep::VerifyLogin, result)
    }

    /// Removes every stored credential and step token and returns to the login entry.
    ///
    /// # Errors
    /// Returns `ApiError::Store` if the store cannot be updated; the session
    /// stays authenticated in that case.
    #[instrument(skip_all)]
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        self.last_error = None;
        let result = self
            .api
            .store()
            .remove_many(&StoreKey::ALL)
            .await
            .map_err(ApiError::from);

        if result.is_ok() {
            self.is_authenticated = false;
            self.reg_token = None;
            self.login_token = None;
            self.registration = RegistrationStage::Idle;
            self.login = LoginStage::Idle;
            self.api.navigator().reset_to(Route::Login);
            info!("signed out");
        }

        self.record(FlowStep::Logout, result)
    }

    async fn try_register(&mut self, email: &str, username: &str) -> Result<(), ApiError> {
        let (email, username) = validation::registration(email, username)?;

        let response = client::register(&self.api, &RegistrationRequest { email, username }).await?;
        let reg_token = SecretString::from(response.reg_token);

        self.api.store().set(StoreKey::RegToken, &reg_token).await?;
        self.reg_token = Some(reg_token);
        self.registration = RegistrationStage::Started;

        info!("registration started");
        Ok(())
    }

    async fn try_verify_registration_code(&mut self, code: &str) -> Result<(), ApiError> {
        let code = validation::code(code)?;
        let reg_token = self.step_token(StoreKey::RegToken).await?;

        client::verify_registration(&self.api, &RegistrationVerifyRequest { code, reg_token })
            .await?;
        self.registration = RegistrationStage::CodeVerified;

        info!("registration code verified");
        Ok(())
    }

    async fn try_set_password(&mut self, password: &str, password2: &str) -> Result<(), ApiError> {
        validation::passwords(password, password2)?;
        let reg_token = self.step_token(StoreKey::RegToken).await?;

        let request = PasswordSetRequest {
            password: password.to_string(),
            password2: password2.to_string(),
            reg_token,
        };
        let pair = client::set_password(&self.api, &request).await?;

        self.complete(pair, StoreKey::RegToken).await?;
        self.registration = RegistrationStage::PasswordSet;

        info!("registration completed");
        Ok(())
    }

    async fn try_login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        let username = validation::credentials(username, password)?;

        let request = LoginRequest {
            username,
            password: password.to_string(),
        };
        let response = client::login(&self.api, &request).await?;
        let login_token = SecretString::from(response.login_token);

        self.api
            .store()
            .set(StoreKey::LoginToken, &login_token)
            .await?;
        self.login_token = Some(login_token);
        self.login = LoginStage::Started;

        info!("login started");
        Ok(())
    }

    async fn try_verify_login_code(&mut self, code: &str) -> Result<(), ApiError> {
        let code = validation::code(code)?;
        let login_token = self.step_token(StoreKey::LoginToken).await?;

        let pair = client::verify_login(&self.api, &LoginVerifyRequest { code, login_token }).await?;

        self.complete(pair, StoreKey::LoginToken).await?;
        self.login = LoginStage::LoggedIn;

        info!("login completed");
        Ok(())
    }

    /// Persists the credential pair, drops the consumed step token and flips
    /// the session to authenticated.
    async fn complete(&mut self, pair: CredentialPair, step_key: StoreKey) -> Result<(), ApiError> {
        let store = self.api.store();
        store
            .set_many(&[
                (StoreKey::AccessToken, &pair.access_token),
                (StoreKey::RefreshToken, &pair.refresh_token),
            ])
            .await?;

        if let Err(err) = store.remove(step_key).await {
            warn!("failed to remove {step_key}: {err}");
        }
        match step_key {
            StoreKey::RegToken => self.reg_token = None,
            StoreKey::LoginToken => self.login_token = None,
            StoreKey::AccessToken | StoreKey::RefreshToken => {}
        }

        self.is_authenticated = true;
        self.api.navigator().reset_to(Route::Home);
        Ok(())
    }

    /// Step token from memory, falling back to the store (the flow may have
    /// been started by an earlier process).
    async fn step_token(&mut self, key: StoreKey) -> Result<String, ApiError> {
        let cached = match key {
            StoreKey::RegToken => self.reg_token.as_ref(),
            StoreKey::LoginToken => self.login_token.as_ref(),
            StoreKey::AccessToken | StoreKey::RefreshToken => None,
        };
        if let Some(token) = cached {
            return Ok(token.expose_secret().to_string());
        }

        let Some(token) = self.api.store().get(key).await? else {
            let flow = if key == StoreKey::RegToken {
                "Registration"
            } else {
                "Login"
            };
            return Err(ApiError::Validation(format!(
                "{flow} token not found, start again"
            )));
        };

        let value = token.expose_secret().to_string();
        match key {
            StoreKey::RegToken => self.reg_token = Some(token),
            StoreKey::LoginToken => self.login_token = Some(token),
            StoreKey::AccessToken | StoreKey::RefreshToken => {}
        }
        Ok(value)
    }

    fn record<T>(&mut self, step: FlowStep, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(err) = &result {
            warn!("{step} failed: {err}");
            self.last_error = Some(FlowError::new(step, err));
        }
        result
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("is_authenticated", &self.is_authenticated)
            .field("registration", &self.registration)
            .field("login", &self.login)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
