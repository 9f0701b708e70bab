//! Cart kept in the key-value store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storefront::prelude::CartItem;
use tracing::debug;

use crate::{
    cart::{CartStore, CartStoreError},
    storage::{KeyValueStore, StoredRecord, keys::CART_KEY, read_record, remove_record, write_record},
};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct CartLines(Vec<CartItem>);

impl StoredRecord for CartLines {
    const KEY: &'static str = CART_KEY;

    /// Carts used to be stored as a bare JSON array.
    fn from_legacy(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok().map(Self)
    }
}

#[derive(Clone)]
pub struct StoredCart {
    store: Arc<dyn KeyValueStore>,
}

impl StoredCart {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Add `item`, merging quantities with an existing line of the same id.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be read or written, or the merged
    /// quantity overflows.
    pub fn add_item(&self, item: CartItem) -> Result<Vec<CartItem>, CartStoreError> {
        let mut items = self.get_cart()?;

        match items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(item.quantity.get())
                    .ok_or_else(|| CartStoreError::QuantityOverflow(item.id.clone()))?;
            }
            None => items.push(item),
        }

        self.set_items(&items)?;

        Ok(items)
    }

    /// Replace the cart contents.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be written.
    pub fn set_items(&self, items: &[CartItem]) -> Result<(), CartStoreError> {
        debug!(lines = items.len(), "writing cart");

        write_record(self.store.as_ref(), &CartLines(items.to_vec()))?;

        Ok(())
    }
}

impl CartStore for StoredCart {
    fn get_cart(&self) -> Result<Vec<CartItem>, CartStoreError> {
        Ok(read_record::<CartLines>(self.store.as_ref())?
            .unwrap_or_default()
            .0)
    }

    fn clear_cart(&self) -> Result<(), CartStoreError> {
        remove_record::<CartLines>(self.store.as_ref())?;

        Ok(())
    }
}
