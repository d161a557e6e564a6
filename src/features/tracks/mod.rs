//! Track feed, detail, creation and likes.

pub mod client;
pub mod feed;
pub mod types;

pub use self::feed::{Feed, Identified, LoadMode};
pub use self::types::{Category, NewTrack, Track, TrackImage};
