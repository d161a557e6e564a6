//! HTTP access to the tracks API with consistent headers, timeouts and error
//! handling. Feature clients build [`ApiRequest`] descriptors and hand them to
//! [`ApiClient`], which owns bearer decoration and token refresh.

mod client;
mod errors;
mod request;

pub use self::client::{ApiClient, ApiResponse, MAX_AUTH_RETRIES, TOKEN_REFRESH_PATH};
pub use self::errors::ApiError;
pub use self::request::{ApiRequest, FormPart, PartValue, RequestBody};
