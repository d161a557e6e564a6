//! Types for track answers.

use crate::features::{tracks::TrackImage, ImageUpload};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Answer {
    pub id: u64,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub creator_avatar: Option<String>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub solution: bool,
    #[serde(default)]
    pub images: Vec<TrackImage>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NewAnswer {
    pub comment: String,
    pub solution: bool,
    pub images: Vec<ImageUpload>,
}

#[derive(Serialize)]
pub(crate) struct CreateAnswerRequest<'a> {
    pub comment: &'a str,
    pub solution: bool,
}

#[derive(Serialize)]
pub(crate) struct MarkSolutionRequest {
    pub solution: bool,
}
