//! Session errors.

use storefront::prelude::Customer;
use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The account was created but signing in with it failed.
    #[error("account created, but signing in failed")]
    AutoLogin {
        customer: Box<Customer>,
        #[source]
        source: ApiError,
    },
}

impl SessionError {
    /// Message supplied by the backend, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api(error) | Self::AutoLogin { source: error, .. } => error.message(),
        }
    }
}
