//! Bearer token.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::storage::{StoredRecord, keys::TOKEN_KEY};

/// Opaque session credential issued at login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl StoredRecord for BearerToken {
    const KEY: &'static str = TOKEN_KEY;

    /// Tokens used to be stored as the bare string.
    fn from_legacy(raw: &str) -> Option<Self> {
        let token = serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string());
        let token = token.trim();

        (!token.is_empty()).then(|| Self::new(token))
    }
}
