//! Session models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront::prelude::Customer;

use crate::{
    api::BearerToken,
    storage::{StoredRecord, keys::SESSION_KEY},
};

/// In-memory session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<Customer>,
    pub token: Option<BearerToken>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

/// The part of [`SessionState`] that survives restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub user: Option<Customer>,

    #[serde(default)]
    pub token: Option<BearerToken>,

    #[serde(default)]
    pub is_authenticated: bool,
}

impl From<&SessionState> for PersistedSession {
    fn from(state: &SessionState) -> Self {
        Self {
            user: state.user.clone(),
            token: state.token.clone(),
            is_authenticated: state.is_authenticated,
        }
    }
}

impl From<PersistedSession> for SessionState {
    fn from(session: PersistedSession) -> Self {
        Self {
            user: session.user,
            token: session.token,
            is_authenticated: session.is_authenticated,
            is_loading: false,
        }
    }
}

impl StoredRecord for PersistedSession {
    const KEY: &'static str = SESSION_KEY;

    /// Older clients wrote `{ "state": { ... }, "version": 0 }` or the bare state.
    fn from_legacy(raw: &str) -> Option<Self> {
        let value = serde_json::from_str::<Value>(raw).ok()?;
        let state = match value {
            Value::Object(mut fields) if fields.contains_key("state") => fields.remove("state")?,
            other => other,
        };

        serde_json::from_value(state).ok()
    }
}

/// How a successful registration ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The account was created and signed in.
    Authenticated,

    /// The account was created without signing in.
    Registered(Option<Customer>),
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::storage::{KeyValueStore, MemoryStore, read_record};

    use super::*;

    #[test]
    fn legacy_wrapped_session_is_migrated() -> TestResult {
        let store = MemoryStore::new();
        store.set(
            SESSION_KEY,
            &json!({
                "state": {
                    "user": { "id": "c-1", "name": "Ana", "email": "ana@example.com" },
                    "token": "abc",
                    "isAuthenticated": true,
                },
                "version": 0,
            })
            .to_string(),
        )?;

        let session = read_record::<PersistedSession>(&store)?.unwrap_or_default();

        assert!(session.is_authenticated);
        assert_eq!(session.token, Some(BearerToken::new("abc")));
        assert_eq!(session.user.map(|user| user.id).as_deref(), Some("c-1"));

        Ok(())
    }

    #[test]
    fn restored_state_is_never_loading() {
        let state = SessionState::from(PersistedSession {
            user: None,
            token: Some(BearerToken::new("abc")),
            is_authenticated: true,
        });

        assert!(!state.is_loading);
        assert!(state.is_authenticated);
    }
}
