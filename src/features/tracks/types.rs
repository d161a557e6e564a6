//! Types for /tracks API requests and responses.

use crate::{api::ApiError, features::ImageUpload};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track {
    pub id: u64,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub creator_avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub category: Vec<Category>,
    #[serde(default)]
    pub images: Vec<TrackImage>,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub already_liked: bool,
    #[serde(default)]
    pub completed: bool,
}

impl Track {
    /// Flips the like state locally, keeping the counter in step.
    pub fn toggle_like_local(&mut self) {
        if self.already_liked {
            self.total_likes = self.total_likes.saturating_sub(1);
        } else {
            self.total_likes += 1;
        }
        self.already_liked = !self.already_liked;
    }
}

/// Categories arrive either as plain names or as objects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCategory")]
pub struct Category {
    pub id: Option<u64>,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Name(String),
    Full {
        #[serde(default)]
        id: Option<u64>,
        #[serde(alias = "title")]
        name: String,
    },
}

impl From<RawCategory> for Category {
    fn from(raw: RawCategory) -> Self {
        match raw {
            RawCategory::Name(name) => Self { id: None, name },
            RawCategory::Full { id, name } => Self { id, name },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackImage {
    pub image: String,
}

#[derive(Deserialize)]
pub(crate) struct HomeResponse {
    pub categories: Vec<Category>,
}

#[derive(Serialize)]
pub(crate) struct CreateTrackRequest<'a> {
    pub subject: &'a str,
    pub description: &'a str,
    pub category_ids: &'a [u64],
}

/// A track to publish.
#[derive(Clone, Debug, Default)]
pub struct NewTrack {
    pub subject: String,
    pub description: String,
    pub category_ids: Vec<u64>,
    pub images: Vec<ImageUpload>,
}

impl NewTrack {
    /// # Errors
    /// Returns `ApiError::Validation` for a blank subject or description, or
    /// when no category is selected.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.subject.trim().is_empty() {
            return Err(ApiError::Validation("Track subject is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::Validation(
                "Track description is required".to_string(),
            ));
        }
        if self.category_ids.is_empty() {
            return Err(ApiError::Validation(
                "Select at least one category".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn track_deserializes_with_defaults() {
        let track: Track = serde_json::from_str(
            r#"{
                "id": 7,
                "subject": "Router keeps rebooting",
                "creator": "alice",
                "category": ["Network", {"id": 3, "name": "Hardware"}],
                "images": [{"image": "/media/tracks/1.jpg"}],
                "total_likes": 2,
                "already_liked": true
            }"#,
        )
        .unwrap();

        assert_eq!(track.id, 7);
        assert_eq!(track.description, "");
        assert!(!track.completed);
        assert_eq!(
            track.category,
            vec![
                Category {
                    id: None,
                    name: "Network".to_string()
                },
                Category {
                    id: Some(3),
                    name: "Hardware".to_string()
                }
            ]
        );
        assert_eq!(track.images[0].image, "/media/tracks/1.jpg");
    }

    #[test]
    fn toggle_like_local_keeps_counter_consistent() {
        let mut track: Track =
            serde_json::from_str(r#"{"id":1,"subject":"s","total_likes":0}"#).unwrap();

        track.toggle_like_local();
        assert!(track.already_liked);
        assert_eq!(track.total_likes, 1);

        track.toggle_like_local();
        assert!(!track.already_liked);
        assert_eq!(track.total_likes, 0);

        track.already_liked = true;
        track.toggle_like_local();
        assert_eq!(track.total_likes, 0);
    }

    #[test]
    fn new_track_validation() {
        let mut track = NewTrack {
            subject: "  ".to_string(),
            description: "details".to_string(),
            category_ids: vec![1],
            images: Vec::new(),
        };
        assert!(track.validate().is_err());

        track.subject = "Printer offline".to_string();
        assert!(track.validate().is_ok());

        track.category_ids.clear();
        assert!(matches!(
            track.validate(),
            Err(ApiError::Validation(msg)) if msg.contains("category")
        ));

        track.category_ids.push(2);
        track.description = "\n".to_string();
        assert!(track.validate().is_err());
    }
}
