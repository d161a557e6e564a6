use crate::store::StoreError;
use serde_json::Value;
use thiserror::Error;

/// Maximum number of error body characters surfaced to users.
const MAX_ERROR_CHARS: usize = 200;
const DEFAULT_HTTP_MESSAGE: &str = "Request failed.";
/// JSON fields the server uses for human-readable error messages.
const MESSAGE_FIELDS: [&str; 3] = ["message", "detail", "error"];

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected locally; no request was sent.
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Builds an HTTP error from a non-success response body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Http {
            status,
            message: server_message(body),
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text suitable for an alert: the server message for HTTP errors, the
    /// local reason for validation errors, `fallback` otherwise.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Http { message, .. } if message != DEFAULT_HTTP_MESSAGE => message.clone(),
            Self::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout("Request timed out. Please try again.".to_string())
        } else if err.is_decode() {
            Self::Parse(format!("Failed to decode response: {err}"))
        } else if err.is_builder() {
            Self::Serialization(format!("Failed to build request: {err}"))
        } else {
            Self::Network(format!("Unable to reach the server: {err}"))
        }
    }
}

/// Extracts the server-provided message, falling back to the sanitized body.
fn server_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        let found = MESSAGE_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str));
        if let Some(message) = found {
            return sanitize_body(message);
        }
    }
    sanitize_body(body)
}

/// Trims and truncates error bodies for user-facing messages.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        DEFAULT_HTTP_MESSAGE.to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_is_preferred() {
        let err = ApiError::from_response(400, r#"{"message":"Username taken","code":7}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message("fallback"), "Username taken");
        assert_eq!(err.to_string(), "Request failed (400): Username taken");
    }

    #[test]
    fn detail_field_is_used() {
        let err = ApiError::from_response(401, r#"{"detail":"Token is invalid or expired"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("x"), "Token is invalid or expired");
    }

    #[test]
    fn plain_bodies_are_truncated() {
        let err = ApiError::from_response(500, &"x".repeat(500));
        let ApiError::Http { message, .. } = err else {
            panic!("expected http error");
        };
        assert_eq!(message.len(), MAX_ERROR_CHARS);
    }

    #[test]
    fn empty_body_uses_fallback() {
        let err = ApiError::from_response(502, "   ");
        assert_eq!(err.user_message("Could not create track"), "Could not create track");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn local_errors_use_fallback_except_validation() {
        let validation = ApiError::Validation("Code must be 6 digits".to_string());
        assert_eq!(validation.user_message("x"), "Code must be 6 digits");
        assert_eq!(validation.status(), None);

        let network = ApiError::Network("down".to_string());
        assert_eq!(network.user_message("Try again"), "Try again");
    }
}
