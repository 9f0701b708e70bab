//! Storefront client services: session, cart, checkout and their storage and
//! HTTP bindings.

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod context;
pub mod navigation;
pub mod observability;
pub mod session;
pub mod storage;

#[cfg(test)]
mod test;
