//! Auth feature module covering the two-step login, three-step registration
//! and the session state they drive. This module touches credentials and must
//! avoid logging passwords, codes or token material.
//!
//! Flow Overview: registration posts email/username, then the emailed code,
//! then the password, and ends with a credential pair. Login posts
//! username/password, then the code, and ends with a credential pair. Token
//! refresh lives in [`crate::api::ApiClient`].

pub mod client;
pub mod state;
pub mod types;
pub mod validation;

pub use self::state::{AuthSession, FlowError, FlowStep, LoginStage, RegistrationStage};
