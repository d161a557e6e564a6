use super::{CredentialStore, StoreError, StoreKey};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-process store, for tests and embedders that persist credentials elsewhere.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with plain values.
    #[must_use]
    pub fn with_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (StoreKey, V)>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").field("values", &"***").finish()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self, key: StoreKey) -> Result<Option<SecretString>, StoreError> {
        let values = self.values.lock().await;
        Ok(values.get(&key).cloned().map(SecretString::from))
    }

    async fn set_many(&self, entries: &[(StoreKey, &SecretString)]) -> Result<(), StoreError> {
        let mut values = self.values.lock().await;
        for (key, value) in entries {
            values.insert(*key, value.expose_secret().to_string());
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[StoreKey]) -> Result<(), StoreError> {
        let mut values = self.values.lock().await;
        for key in keys {
            values.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get(StoreKey::AccessToken).await.unwrap().is_none());

        store
            .set(StoreKey::AccessToken, &SecretString::from("AT1".to_string()))
            .await
            .unwrap();
        let token = store.get(StoreKey::AccessToken).await.unwrap().unwrap();
        assert_eq!(token.expose_secret(), "AT1");

        store.remove(StoreKey::AccessToken).await.unwrap();
        assert!(!store.contains(StoreKey::AccessToken).await.unwrap());
    }

    #[tokio::test]
    async fn remove_many_ignores_missing_keys() {
        let store = MemoryStore::with_values([(StoreKey::RefreshToken, "RT1")]);
        store
            .remove_many(&[StoreKey::AccessToken, StoreKey::RefreshToken])
            .await
            .unwrap();
        assert!(!store.contains(StoreKey::RefreshToken).await.unwrap());
    }
}
