//! Session
//!
//! Client-held record of the signed-in customer and their bearer token.

pub mod errors;
pub mod models;
mod store;

pub use errors::SessionError;
pub use models::{PersistedSession, RegistrationOutcome, SessionState};
pub use store::SessionStore;
