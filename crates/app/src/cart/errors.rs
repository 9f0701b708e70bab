//! Cart store errors.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("cart storage error")]
    Storage(#[from] StorageError),

    #[error("quantity for item `{0}` is out of range")]
    QuantityOverflow(String),
}
