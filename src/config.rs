//! Client configuration: API base URL, request timeout and where credentials
//! are persisted. Values come from CLI flags or their environment fallbacks.
//! Configuration values are public; do not store secrets here.

use crate::api::ApiError;
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Default request timeout (milliseconds) applied to every API call.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_STORE_PATH: &str = ".tracks/credentials.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub store_path: PathBuf,
}

impl AppConfig {
    /// Builds a config after checking the base URL is an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the URL cannot be parsed, has no host, or
    /// uses an unsupported scheme.
    pub fn new(
        api_base_url: &str,
        timeout: Duration,
        store_path: impl Into<PathBuf>,
    ) -> Result<Self, ApiError> {
        let api_base_url = normalize_base_url(api_base_url)?;

        Ok(Self {
            api_base_url,
            timeout,
            store_path: store_path.into(),
        })
    }

    /// Base URL for uploaded media; the API lives under `/api` while media
    /// paths are served from the site root.
    #[must_use]
    pub fn media_base_url(&self) -> &str {
        self.api_base_url
            .strip_suffix("/api")
            .unwrap_or(&self.api_base_url)
    }

    /// Resolves an image or avatar path returned by the API.
    #[must_use]
    pub fn media_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.media_base_url(),
            path.trim().trim_start_matches('/')
        )
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Config("API base URL is not configured.".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|err| ApiError::Config(format!("Invalid API base URL: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ApiError::Config(format!(
                "Invalid API base URL: unsupported scheme {scheme}"
            )))
        }
    }

    if url.host().is_none() {
        return Err(ApiError::Config(
            "Invalid API base URL: no host specified".to_string(),
        ));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(url: &str) -> AppConfig {
        AppConfig::new(url, Duration::from_millis(DEFAULT_TIMEOUT_MS), DEFAULT_STORE_PATH)
            .unwrap()
    }

    #[test]
    fn base_url_is_trimmed() {
        let config = config("  https://tracks.example.com/api/  ");
        assert_eq!(config.api_base_url, "https://tracks.example.com/api");
    }

    #[test]
    fn base_url_rejects_bad_values() {
        for url in ["", "   ", "not a url", "ftp://tracks.example.com", "unix:///tmp/sock"] {
            let result = AppConfig::new(url, Duration::from_secs(1), DEFAULT_STORE_PATH);
            assert!(matches!(result, Err(ApiError::Config(_))), "{url}");
        }
    }

    #[test]
    fn media_urls_drop_api_suffix() {
        let config = config("https://tracks.example.com/api");
        assert_eq!(config.media_base_url(), "https://tracks.example.com");
        assert_eq!(
            config.media_url("/media/avatars/a.jpg"),
            "https://tracks.example.com/media/avatars/a.jpg"
        );
        assert_eq!(
            config.media_url("https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn media_urls_without_api_suffix() {
        let config = config("http://127.0.0.1:8000");
        assert_eq!(
            config.media_url("media/x.png"),
            "http://127.0.0.1:8000/media/x.png"
        );
    }
}
