//! Types for /me API requests and responses.

use crate::features::ImageUpload;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Fields to change on the current profile; `None` leaves a field as is.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<ImageUpload>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.bio.is_none() && self.avatar.is_none()
    }
}
