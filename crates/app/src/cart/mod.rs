//! Cart
//!
//! The checkout only reads and clears the cart; adding and replacing items is
//! here for the CLI.

pub mod errors;
mod stored;

use mockall::automock;
use storefront::prelude::CartItem;

pub use errors::CartStoreError;
pub use stored::StoredCart;

#[automock]
pub trait CartStore: Send + Sync {
    /// Current cart lines.
    fn get_cart(&self) -> Result<Vec<CartItem>, CartStoreError>;

    /// Empty the cart.
    fn clear_cart(&self) -> Result<(), CartStoreError>;
}
