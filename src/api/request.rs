//! Immutable request descriptors. A descriptor is built once by a feature
//! client and may be sent twice (original attempt and the post-refresh retry),
//! so every body variant owns its data and can be rebuilt on demand.

use super::ApiError;
use reqwest::{multipart, Method};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

#[derive(Clone, Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

#[derive(Clone, Debug)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

#[derive(Clone)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl std::fmt::Debug for PartValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Self::File {
                file_name,
                mime,
                bytes,
            } => f
                .debug_struct("File")
                .field("file_name", file_name)
                .field("mime", mime)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Attaches a JSON body.
    ///
    /// # Errors
    /// Returns `ApiError::Serialization` if `body` cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::Serialization(format!("Failed to encode request: {err}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    #[must_use]
    pub fn body(&self) -> &RequestBody {
        &self.body
    }
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: PartValue::Text(value.to_string()),
        }
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            value: PartValue::File {
                file_name: file_name.into(),
                mime: mime.into(),
                bytes,
            },
        }
    }
}

/// Builds a fresh multipart form; forms are consumed by sending.
pub(crate) fn build_form(parts: &[FormPart]) -> Result<multipart::Form, ApiError> {
    let mut form = multipart::Form::new();
    for part in parts {
        form = match &part.value {
            PartValue::Text(value) => form.text(part.name.clone(), value.clone()),
            PartValue::File {
                file_name,
                mime,
                bytes,
            } => {
                let file = multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)
                    .map_err(|err| {
                        ApiError::Serialization(format!("Invalid content type {mime}: {err}"))
                    })?;
                form.part(part.name.clone(), file)
            }
        };
    }
    Ok(form)
}
