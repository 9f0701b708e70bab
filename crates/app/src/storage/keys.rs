//! Storage slot names.

/// Bearer token used by the HTTP transport.
pub const TOKEN_KEY: &str = "auth_token";

/// Persisted session snapshot.
pub const SESSION_KEY: &str = "auth-storage";

/// Most recently placed order.
pub const LAST_ORDER_KEY: &str = "lastOrder";

/// Cart contents.
pub const CART_KEY: &str = "cart";
