pub mod client;
pub mod types;

pub use self::types::PublicProfile;
