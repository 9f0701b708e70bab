//! Identity collaborator.

use async_trait::async_trait;
use mockall::automock;
use storefront::prelude::{Customer, CustomerUpdate, Password, RegisterData};

use crate::api::{
    ApiError,
    models::{LoginResponse, RegisterResponse},
};

#[automock]
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Exchange credentials for a customer record and bearer token.
    async fn login(&self, email: &str, password: &Password) -> Result<LoginResponse, ApiError>;

    /// Create a customer account.
    async fn register(&self, data: &RegisterData) -> Result<RegisterResponse, ApiError>;

    /// Fetch the customer the stored token belongs to.
    async fn current_customer(&self) -> Result<Customer, ApiError>;

    /// Apply a partial profile update, returning the updated record.
    async fn update_customer(&self, update: &CustomerUpdate) -> Result<Customer, ApiError>;

    /// Invalidate the stored token on the backend.
    async fn logout(&self) -> Result<(), ApiError>;
}
