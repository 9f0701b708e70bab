//! Storefront API
//!
//! Collaborator seams for the identity and order endpoints, and the `reqwest`
//! binding that implements both against the storefront backend.

pub mod errors;
mod http;
pub mod identity;
pub mod models;
pub mod orders;
pub mod token;

pub use errors::ApiError;
pub use http::{HttpConfig, HttpStorefrontClient};
pub use identity::*;
pub use orders::*;
pub use token::BearerToken;
