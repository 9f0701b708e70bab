//! Checkout errors.

use storefront::prelude::{PricingError, ShippingValidationError};
use thiserror::Error;

use crate::{api::ApiError, cart::CartStoreError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ShippingValidationError),

    #[error("orders can only be placed from the payment step")]
    NotOnPaymentStep,

    #[error("an order is already being placed")]
    SubmissionInFlight,

    #[error("the cart is empty")]
    EmptyCart,

    #[error("failed to price the cart")]
    Pricing(#[from] PricingError),

    #[error("failed to read the cart")]
    Cart(#[from] CartStoreError),

    /// The order API refused or could not be reached. `message` is what the
    /// customer is shown.
    #[error("{message}")]
    Submission {
        message: String,
        #[source]
        source: ApiError,
    },
}
