//! Order collaborator.

use async_trait::async_trait;
use mockall::automock;
use storefront::prelude::OrderSubmission;

use crate::api::{ApiError, models::PlacedOrder};

#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Place an order without an account.
    async fn create_guest_order(&self, order: &OrderSubmission) -> Result<PlacedOrder, ApiError>;

    /// Place an order on behalf of the signed-in customer.
    async fn create_order(&self, order: &OrderSubmission) -> Result<PlacedOrder, ApiError>;
}
