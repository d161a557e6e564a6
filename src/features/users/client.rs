use crate::{
    api::{ApiClient, ApiError},
    features::users::types::PublicProfile,
};

/// Fetches another user's public profile.
pub async fn fetch_user(api: &ApiClient, username: &str) -> Result<PublicProfile, ApiError> {
    let username = username.trim();
    if username.is_empty() || username.contains('/') {
        return Err(ApiError::Validation("Username is not valid".to_string()));
    }
    api.get_json(&format!("/users/{username}/")).await
}
