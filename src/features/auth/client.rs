//! Client wrappers for the registration and login endpoints. These helpers go
//! through the shared [`ApiClient`] so headers stay consistent; they must
//! never log request payloads.

use crate::{
    api::{ApiClient, ApiError},
    features::auth::types::{
        CredentialPair, LoginRequest, LoginResponse, LoginVerifyRequest, PasswordSetRequest,
        RegistrationRequest, RegistrationResponse, RegistrationVerifyRequest, TokenPairResponse,
    },
};

/// Starts registration and returns the server response with the `reg_token`.
pub async fn register(
    api: &ApiClient,
    request: &RegistrationRequest,
) -> Result<RegistrationResponse, ApiError> {
    api.post_json("/registration/", request).await
}

/// Confirms the emailed registration code.
pub async fn verify_registration(
    api: &ApiClient,
    request: &RegistrationVerifyRequest,
) -> Result<(), ApiError> {
    api.post_json_empty("/registration/verification/", request)
        .await
}

/// Sets the account password and receives the first credential pair.
pub async fn set_password(
    api: &ApiClient,
    request: &PasswordSetRequest,
) -> Result<CredentialPair, ApiError> {
    let response: TokenPairResponse = api
        .post_json("/registration/password-set/", request)
        .await?;
    Ok(response.into())
}

/// Checks username and password and returns the `login_token`.
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    api.post_json("/login/", request).await
}

/// Confirms the login code and receives the credential pair.
pub async fn verify_login(
    api: &ApiClient,
    request: &LoginVerifyRequest,
) -> Result<CredentialPair, ApiError> {
    let response: TokenPairResponse = api.post_json("/login/verification/", request).await?;
    Ok(response.into())
}
