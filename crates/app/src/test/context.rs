//! Test context for flow-level tests.

use std::sync::Arc;

use storefront::prelude::{CartItem, DiscountRule, OrderRecord, ShippingPolicy};

use crate::{
    api::{MockIdentityApi, MockOrdersApi},
    cart::{CartStore, StoredCart},
    checkout::{CheckoutServices, read_last_order},
    session::SessionStore,
    storage::MemoryStore,
};

/// In-memory storage and cart shared between the services under test.
pub(crate) struct TestContext {
    pub store: Arc<MemoryStore>,
    pub cart: Arc<StoredCart>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let cart = Arc::new(StoredCart::new(store.clone()));

        Self { store, cart }
    }

    pub fn with_cart(items: &[CartItem]) -> Self {
        let ctx = Self::new();

        ctx.cart
            .set_items(items)
            .expect("Failed to seed test cart");

        ctx
    }

    pub fn session(&self, identity: MockIdentityApi) -> SessionStore {
        SessionStore::new(Arc::new(identity), self.store.clone())
    }

    pub fn checkout_services(&self, orders: MockOrdersApi) -> CheckoutServices {
        CheckoutServices {
            orders: Arc::new(orders),
            cart: self.cart.clone(),
            store: self.store.clone(),
            policy: ShippingPolicy::default(),
            rules: vec![DiscountRule::weight_based()],
        }
    }

    pub fn cart_items(&self) -> Vec<CartItem> {
        self.cart.get_cart().expect("Failed to read test cart")
    }

    pub fn last_order(&self) -> Option<OrderRecord> {
        read_last_order(self.store.as_ref()).expect("Failed to read last order")
    }
}
