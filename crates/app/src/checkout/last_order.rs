//! Last placed order.

use storefront::prelude::OrderRecord;

use crate::storage::{KeyValueStore, StorageError, StoredRecord, keys::LAST_ORDER_KEY, read_record};

impl StoredRecord for OrderRecord {
    const KEY: &'static str = LAST_ORDER_KEY;

    /// Orders used to be stored as the bare record.
    fn from_legacy(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// The order shown on the confirmation view.
///
/// # Errors
///
/// Returns an error when the slot cannot be read or decoded.
pub fn read_last_order(store: &dyn KeyValueStore) -> Result<Option<OrderRecord>, StorageError> {
    read_record(store)
}
