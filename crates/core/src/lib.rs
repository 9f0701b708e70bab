//! Storefront
//!
//! Client-side domain for a retail storefront checkout: cart line items, order pricing,
//! promotional badges, customer identity models and the checkout wizard's form and steps.

pub mod cart;
pub mod checkout;
pub mod customers;
pub mod discounts;
pub mod orders;
pub mod prelude;
pub mod pricing;
