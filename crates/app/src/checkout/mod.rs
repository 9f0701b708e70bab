//! Checkout
//!
//! Drives the two-step checkout wizard against the cart, pricing and the order
//! API.

pub mod errors;
mod flow;
mod last_order;

pub use errors::CheckoutError;
pub use flow::*;
pub use last_order::read_last_order;
