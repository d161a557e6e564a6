use super::{CredentialStore, StoreError, StoreKey};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};
use tracing::{debug, instrument};

/// JSON file store. Reads always hit the file so callers see the latest
/// persisted token; writes replace the file atomically via rename.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

type Entries = BTreeMap<String, String>;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Entries::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let payload = serde_json::to_vec_pretty(entries)?;
        let tmp_path = self.tmp_path();

        let written = write_private(&tmp_path, &payload).await;
        let result = match written {
            Ok(()) => fs::rename(&tmp_path, &self.path).await.map_err(StoreError::from),
            Err(err) => Err(err),
        };
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path).await;
        }
        result?;

        debug!("credential store updated: {}", self.path.display());

        Ok(())
    }

    /// Sibling temp file, unique per process and write.
    fn tmp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("credentials");
        let suffix = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path
            .with_file_name(format!(".{file_name}.{}.{suffix}.tmp", std::process::id()))
    }
}

/// Creates `path` owner-only before any byte is written.
async fn write_private(path: &Path, payload: &[u8]) -> Result<(), StoreError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(payload).await?;
    file.sync_all().await?;
    drop(file);

    restrict_permissions(path).await
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").field("path", &self.path).finish()
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[async_trait]
impl CredentialStore for FileStore {
    #[instrument(skip(self))]
    async fn get(&self, key: StoreKey) -> Result<Option<SecretString>, StoreError> {
        let mut entries = self.load().await?;
        Ok(entries.remove(key.as_str()).map(SecretString::from))
    }

    #[instrument(skip_all)]
    async fn set_many(&self, values: &[(StoreKey, &SecretString)]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        for (key, value) in values {
            entries.insert(key.as_str().to_string(), value.expose_secret().to_string());
        }
        self.persist(&entries).await
    }

    #[instrument(skip(self))]
    async fn remove_many(&self, keys: &[StoreKey]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        let before = entries.len();
        for key in keys {
            entries.remove(key.as_str());
        }
        if entries.len() == before {
            return Ok(());
        }
        self.persist(&entries).await
    }
}
