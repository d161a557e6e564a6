//! Durable key-value storage for credentials and flow step tokens.
//!
//! The store is the only shared mutable resource touched by the API client and
//! the auth flows. Each operation is atomic on its own, but sequences of
//! operations are not transactional: a `get` may observe a value that a
//! concurrent refresh is about to overwrite. Values are always handled as
//! [`SecretString`] and must never be logged.

mod file;
mod memory;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;

use async_trait::async_trait;
use secrecy::SecretString;
use std::fmt;
use thiserror::Error;

/// Fixed names under which values are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreKey {
    AccessToken,
    RefreshToken,
    RegToken,
    LoginToken,
}

impl StoreKey {
    pub const ALL: [Self; 4] = [
        Self::AccessToken,
        Self::RefreshToken,
        Self::RegToken,
        Self::LoginToken,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
            Self::RegToken => "reg_token",
            Self::LoginToken => "login_token",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential store is corrupted: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Reads the latest persisted value for `key`.
    async fn get(&self, key: StoreKey) -> Result<Option<SecretString>, StoreError>;

    /// Writes all entries in one atomic update.
    async fn set_many(&self, entries: &[(StoreKey, &SecretString)]) -> Result<(), StoreError>;

    /// Removes all keys in one atomic update. Missing keys are ignored.
    async fn remove_many(&self, keys: &[StoreKey]) -> Result<(), StoreError>;

    async fn set(&self, key: StoreKey, value: &SecretString) -> Result<(), StoreError> {
        self.set_many(&[(key, value)]).await
    }

    async fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        self.remove_many(&[key]).await
    }

    async fn contains(&self, key: StoreKey) -> Result<bool, StoreError> {
        Ok(self.get(key).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_key_names_are_stable() {
        let names: Vec<&str> = StoreKey::ALL.iter().map(|key| key.as_str()).collect();
        assert_eq!(
            names,
            vec!["access_token", "refresh_token", "reg_token", "login_token"]
        );
        assert_eq!(StoreKey::RefreshToken.to_string(), "refresh_token");
    }
}
