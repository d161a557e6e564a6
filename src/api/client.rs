//! Authenticated HTTP client for the tracks API.
//!
//! Flow Overview:
//! - Read the latest access token from the credential store (never cached).
//! - Attach `Authorization: Bearer <token>` when present and always attach the
//!   client-type header.
//! - On `401` for a first attempt: exchange the refresh token, persist the new
//!   access token, and resend the same descriptor once with it.
//! - No refresh token, or a failed exchange: purge credentials (failure case
//!   only), reset navigation to the login entry and return the error.
//! - Any other failure is returned unchanged with no token mutation.
//!
//! Each request carries its own retry counter, so concurrent requests that hit
//! `401` at the same time run independent refresh sequences.

use super::{
    request::{build_form, ApiRequest, RequestBody},
    ApiError,
};
use crate::{
    config::AppConfig,
    features::auth::types::{RefreshRequest, RefreshResponse},
    navigation::{Navigator, Route},
    store::{CredentialStore, StoreKey},
    APP_USER_AGENT, CLIENT_TYPE, CLIENT_TYPE_HEADER,
};
use reqwest::{header::AUTHORIZATION, Client, Method, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn, Instrument};

/// A request that fails authorization is resent at most this many times.
pub const MAX_AUTH_RETRIES: u8 = 1;
pub const TOKEN_REFRESH_PATH: &str = "/token/refresh/";

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<AppConfig>,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

/// Status and raw body of a successful response.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Decodes the body as JSON.
    ///
    /// # Errors
    /// Returns `ApiError::Parse` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body)
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    }
}

impl ApiClient {
    /// # Errors
    /// Returns `ApiError::Serialization` if the HTTP client cannot be built.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
            store,
            navigator,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Sends `request`, recovering once from an expired access token.
    ///
    /// # Errors
    /// Returns the most specific error available: the original error for
    /// non-401 failures, the original 401 when no refresh token exists, the
    /// refresh error when the exchange fails, or the retried request's own error.
    #[instrument(skip_all, fields(method = %request.method(), path = request.path()))]
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut access_token = self.store.get(StoreKey::AccessToken).await?;
        let mut retries: u8 = 0;

        loop {
            match self.dispatch(request, access_token.as_ref()).await {
                Err(err) if err.is_unauthorized() && retries < MAX_AUTH_RETRIES => {
                    retries += 1;
                    access_token = Some(self.recover_session(err).await?);
                    debug!("retrying request with refreshed access token");
                }
                result => return result,
            }
        }
    }

    /// Sends `request` and decodes a JSON response.
    ///
    /// # Errors
    /// See [`ApiClient::send`]; also `ApiError::Parse` for unexpected bodies.
    pub async fn send_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        self.send(request).await?.json()
    }

    /// Sends `request` and discards the response body.
    ///
    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn send_empty(&self, request: &ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    /// # Errors
    /// See [`ApiClient::send_json`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(&ApiRequest::get(path)).await
    }

    /// # Errors
    /// See [`ApiClient::send_json`].
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(&ApiRequest::post(path).json(body)?).await
    }

    /// Posts JSON and expects no meaningful response body.
    ///
    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn post_json_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send_empty(&ApiRequest::post(path).json(body)?).await
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send_empty(&ApiRequest::post(path)).await
    }

    /// # Errors
    /// See [`ApiClient::send_json`].
    pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(&ApiRequest::patch(path).json(body)?).await
    }

    /// Decorates and sends a single attempt of `request`.
    async fn dispatch(
        &self,
        request: &ApiRequest,
        access_token: Option<&SecretString>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(request.path());

        let mut builder = self
            .http
            .request(request.method().clone(), &url)
            .header(CLIENT_TYPE_HEADER, CLIENT_TYPE);

        if let Some(token) = access_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }

        builder = match request.body() {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                error!("network error: {err}");
                return Err(err.into());
            }
        };

        read_response(response).await
    }

    /// Handles a `401`: exchanges the refresh token and persists the new access
    /// token, or signs the user out.
    async fn recover_session(&self, unauthorized: ApiError) -> Result<SecretString, ApiError> {
        let Some(refresh_token) = self.store.get(StoreKey::RefreshToken).await? else {
            warn!("access token rejected and no refresh token available");
            self.navigator.reset_to(Route::Login);
            return Err(unauthorized);
        };

        let refreshed = match self.exchange_refresh_token(&refresh_token).await {
            Ok(access_token) => self
                .store
                .set(StoreKey::AccessToken, &access_token)
                .await
                .map(|()| access_token)
                .map_err(ApiError::from),
            Err(err) => Err(err),
        };

        match refreshed {
            Ok(access_token) => {
                info!("access token refreshed");
                Ok(access_token)
            }
            Err(err) => {
                error!("token refresh failed: {err}");
                if let Err(purge_err) = self
                    .store
                    .remove_many(&[StoreKey::AccessToken, StoreKey::RefreshToken])
                    .await
                {
                    error!("failed to purge credentials: {purge_err}");
                }
                self.navigator.reset_to(Route::Login);
                Err(err)
            }
        }
    }

    /// Calls the refresh endpoint directly; the expired access token is never
    /// attached and the exchange itself is never retried.
    async fn exchange_refresh_token(
        &self,
        refresh_token: &SecretString,
    ) -> Result<SecretString, ApiError> {
        let url = self.url(TOKEN_REFRESH_PATH);
        let payload = RefreshRequest {
            refresh: refresh_token.expose_secret().to_string(),
        };

        let span = tracing::info_span!(
            "token.refresh",
            http.method = "POST",
            path = TOKEN_REFRESH_PATH
        );
        let response = self
            .http
            .request(Method::POST, &url)
            .header(CLIENT_TYPE_HEADER, CLIENT_TYPE)
            .json(&payload)
            .send()
            .instrument(span)
            .await?;

        let refreshed: RefreshResponse = read_response(response).await?.json()?;
        if refreshed.access.trim().is_empty() {
            return Err(ApiError::Parse(
                "Refresh response did not contain an access token".to_string(),
            ));
        }

        Ok(SecretString::from(refreshed.access))
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.config.api_base_url, path)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base_url", &self.config.api_base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

/// Maps a response to `ApiResponse` or an `ApiError::Http` with a sanitized message.
///
/// A success whose body cannot be read fully is a transport error. Error
/// bodies only feed the message, so an unreadable one falls back to empty.
async fn read_response(response: Response) -> Result<ApiResponse, ApiError> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        debug!("response status {status}");
        Ok(ApiResponse { status, body })
    } else {
        let body = response.text().await.unwrap_or_default();
        warn!("response status {status}");
        Err(ApiError::from_response(status.as_u16(), &body))
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
