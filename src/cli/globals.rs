use crate::{api::ApiError, config::AppConfig};
use std::{path::PathBuf, time::Duration};

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub store_path: PathBuf,
    pub timeout_ms: u64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, store_path: PathBuf, timeout_ms: u64) -> Self {
        Self {
            api_url,
            store_path,
            timeout_ms,
        }
    }

    /// # Errors
    /// Returns `ApiError::Config` if the API URL is not a valid http(s) URL.
    pub fn config(&self) -> Result<AppConfig, ApiError> {
        AppConfig::new(
            &self.api_url,
            Duration::from_millis(self.timeout_ms),
            self.store_path.clone(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "https://tracks.example.com/api/".to_string(),
            PathBuf::from("creds.json"),
            2500,
        );
        let config = args.config().unwrap();
        assert_eq!(config.api_base_url, "https://tracks.example.com/api");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.store_path, PathBuf::from("creds.json"));
    }

    #[test]
    fn test_invalid_url() {
        let args = GlobalArgs::new("ftp://tracks".to_string(), PathBuf::from("c.json"), 10);
        assert!(matches!(args.config(), Err(ApiError::Config(_))));
    }
}
