//! Storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    #[error("stored value for `{key}` is malformed")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored value for `{key}` is not a recognised record")]
    Unrecognised { key: &'static str },

    #[error("stored value for `{key}` uses unsupported schema version {found}")]
    UnsupportedVersion { key: &'static str, found: u64 },

    #[error("failed to encode value for `{key}`")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage lock poisoned")]
    Poisoned,
}
