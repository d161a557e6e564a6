//! Client helpers for current-user endpoints.

use crate::{
    api::{ApiClient, ApiError, ApiRequest, FormPart},
    features::me::types::{Profile, ProfileUpdate},
};

/// Fetch the authenticated user's profile.
pub async fn fetch_me(api: &ApiClient) -> Result<Profile, ApiError> {
    api.get_json("/me/").await
}

/// Update the authenticated user's profile as multipart form data, so an
/// avatar can be sent in the same request.
pub async fn update_me(api: &ApiClient, update: ProfileUpdate) -> Result<Profile, ApiError> {
    if update.is_empty() {
        return Err(ApiError::Validation("Nothing to update".to_string()));
    }

    let mut parts = Vec::new();
    if let Some(username) = &update.username {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::Validation("Username cannot be empty".to_string()));
        }
        parts.push(FormPart::text("username", username));
    }
    if let Some(bio) = &update.bio {
        parts.push(FormPart::text("bio", bio));
    }
    if let Some(avatar) = update.avatar {
        parts.push(avatar.into_part("avatar"));
    }

    api.send_json(&ApiRequest::patch("/me/").multipart(parts))
        .await
}
