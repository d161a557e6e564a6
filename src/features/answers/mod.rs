//! Threaded answers under a track and solution marking.

pub mod client;
pub mod types;

pub use self::types::{Answer, NewAnswer};
