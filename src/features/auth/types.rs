//! Request and response types for the registration, login and refresh calls.
//! These payloads carry passwords, codes and tokens, so they must never be logged.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub username: String,
}

#[derive(Deserialize)]
pub struct RegistrationResponse {
    pub reg_token: String,
}

#[derive(Serialize)]
pub struct RegistrationVerifyRequest {
    pub code: String,
    pub reg_token: String,
}

#[derive(Serialize)]
pub struct PasswordSetRequest {
    pub password: String,
    pub password2: String,
    pub reg_token: String,
}

#[derive(Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub login_token: String,
}

#[derive(Serialize)]
pub struct LoginVerifyRequest {
    pub code: String,
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Access/refresh credential pair issued at the end of a flow.
#[derive(Debug)]
pub struct CredentialPair {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
}

impl From<TokenPairResponse> for CredentialPair {
    fn from(response: TokenPairResponse) -> Self {
        Self {
            access_token: SecretString::from(response.access_token),
            refresh_token: SecretString::from(response.refresh_token),
        }
    }
}
