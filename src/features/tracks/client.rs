//! Client wrappers for track endpoints.

use crate::{
    api::{ApiClient, ApiError, ApiRequest, FormPart},
    features::{
        tracks::{
            feed::Identified,
            types::{Category, CreateTrackRequest, HomeResponse, NewTrack, Track},
        },
        Page,
    },
};
use tracing::{debug, warn};

impl Identified for Track {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Fetches one page of the track feed, optionally filtered by a search query.
pub async fn list_tracks(
    api: &ApiClient,
    page: u32,
    search: Option<&str>,
) -> Result<Page<Track>, ApiError> {
    let mut request = ApiRequest::get("/tracks/").query("page", page);
    if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
        request = request.query("search", search);
    }
    api.send_json(&request).await
}

/// Fetches a single track with its full description and images.
pub async fn fetch_track(api: &ApiClient, id: u64) -> Result<Track, ApiError> {
    api.get_json(&format!("/track/{id}/")).await
}

/// Publishes a track. Sent as JSON unless images are attached.
pub async fn create_track(api: &ApiClient, track: NewTrack) -> Result<Track, ApiError> {
    track.validate()?;

    let request = if track.images.is_empty() {
        ApiRequest::post("/tracks/").json(&CreateTrackRequest {
            subject: track.subject.trim(),
            description: track.description.trim(),
            category_ids: &track.category_ids,
        })?
    } else {
        let mut parts = vec![
            FormPart::text("subject", track.subject.trim()),
            FormPart::text("description", track.description.trim()),
        ];
        parts.extend(
            track
                .category_ids
                .iter()
                .map(|id| FormPart::text("category_ids", id)),
        );
        parts.extend(track.images.into_iter().map(|image| image.into_part("images")));
        ApiRequest::post("/tracks/").multipart(parts)
    };

    api.send_json(&request).await
}

/// Toggles the current user's like on a track server-side.
pub async fn like_track(api: &ApiClient, id: u64) -> Result<(), ApiError> {
    api.post_empty(&format!("/tracks/{id}/like/")).await
}

/// Applies the like locally first and reverts it if the server call fails.
pub async fn toggle_like(api: &ApiClient, track: &mut Track) -> Result<(), ApiError> {
    track.toggle_like_local();

    if let Err(err) = like_track(api, track.id).await {
        warn!("like failed for track {}: {err}", track.id);
        track.toggle_like_local();
        return Err(err);
    }

    debug!("track {} liked: {}", track.id, track.already_liked);
    Ok(())
}

/// Lists the categories a track can be filed under. Categories without an id
/// are numbered from 1 in the order the server returns them.
pub async fn list_categories(api: &ApiClient) -> Result<Vec<Category>, ApiError> {
    let response: HomeResponse = api.get_json("/home/").await?;
    Ok(response
        .categories
        .into_iter()
        .zip(1u64..)
        .map(|(category, position)| Category {
            id: category.id.or(Some(position)),
            name: category.name,
        })
        .collect())
}
