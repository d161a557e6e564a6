use serde::{Deserialize, Serialize};

/// Profile of another user as shown next to their tracks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicProfile {
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u64>,
    #[serde(default)]
    pub date_joined: Option<String>,
}
