//! Checkout
//!
//! The two-step checkout wizard: a shipping form that must be complete before the
//! customer may move on to reviewing and placing the order.

mod form;
mod step;

pub use form::*;
pub use step::*;
