//! Feature clients, one module per API area. Each keeps request/response types
//! in `types` and endpoint wrappers in `client`.

pub mod answers;
pub mod auth;
pub mod me;
pub mod tracks;
pub mod users;

use crate::api::{ApiError, FormPart};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Paginated list envelope used by list endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|next| !next.is_empty())
    }
}

/// An image to upload with a track, an answer, or as an avatar.
#[derive(Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Reads an image from disk, guessing its content type from the extension.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` if the file cannot be read or is empty.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            ApiError::Validation(format!("Cannot read image {}: {err}", path.display()))
        })?;
        if bytes.is_empty() {
            return Err(ApiError::Validation(format!(
                "Image {} is empty",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("image")
            .to_string();

        Ok(Self {
            mime: mime_for(&file_name).to_string(),
            file_name,
            bytes,
        })
    }

    pub(crate) fn into_part(self, field: &str) -> FormPart {
        FormPart::file(field, self.file_name, self.mime, self.bytes)
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
