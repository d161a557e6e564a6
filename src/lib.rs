//! # Tracks (community Q&A client)
//!
//! `tracks` talks to the tracks API: users register and sign in through
//! two-step code flows, browse and create tracks (questions with images and
//! categories), like them, and post threaded answers.
//!
//! ## Authentication
//!
//! Every request goes through [`api::ApiClient`]. It reads the current access
//! token from the durable [`store::CredentialStore`] right before sending,
//! attaches it as a bearer credential, and always adds the `X-Client-Type`
//! header. When the server answers `401 Unauthorized` the client exchanges the
//! stored refresh token at `/token/refresh/`, persists the new access token and
//! resends the original request exactly once. If no refresh token exists, or
//! the exchange fails, the stored credentials are purged and the
//! [`navigation::Navigator`] is reset to the login entry point.
//!
//! ## Sessions
//!
//! [`features::auth::AuthSession`] owns the in-memory session state (the
//! authenticated flag and the short-lived registration/login step tokens). It is
//! passed explicitly to whoever needs it; there is no global auth state.

pub mod api;
pub mod cli;
pub mod config;
pub mod features;
pub mod navigation;
pub mod store;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Header the server uses to tell mobile clients apart from other consumers.
pub const CLIENT_TYPE_HEADER: &str = "X-Client-Type";
pub const CLIENT_TYPE: &str = "mobile";
