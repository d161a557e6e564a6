//! Current-user profile.

pub mod client;
pub mod types;

pub use self::types::{Profile, ProfileUpdate};
