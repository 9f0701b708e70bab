//! Session store.

use std::{fmt, sync::Arc};

use storefront::prelude::{Customer, CustomerUpdate, Password, RegisterData};
use tracing::{debug, error, info, warn};

use crate::{
    api::{BearerToken, IdentityApi},
    session::{PersistedSession, RegistrationOutcome, SessionError, SessionState},
    storage::{KeyValueStore, read_record, remove_record, write_record},
};

/// Owns the session state and keeps the token and session slots in step with it.
///
/// Every mutating operation takes `&mut self`, so at most one is in flight.
pub struct SessionStore {
    identity: Arc<dyn IdentityApi>,
    store: Arc<dyn KeyValueStore>,
    state: SessionState,
}

impl SessionStore {
    /// Start with an empty, signed-out session.
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            identity,
            store,
            state: SessionState::default(),
        }
    }

    /// Rebuild the session persisted by a previous run.
    ///
    /// An unreadable session slot yields a signed-out session.
    #[must_use]
    pub fn restore(identity: Arc<dyn IdentityApi>, store: Arc<dyn KeyValueStore>) -> Self {
        let state = match read_record::<PersistedSession>(store.as_ref()) {
            Ok(Some(session)) => SessionState::from(session),
            Ok(None) => SessionState::default(),
            Err(error) => {
                warn!(error = %error, "discarding unreadable persisted session");
                SessionState::default()
            }
        };

        debug!(authenticated = state.is_authenticated, "session restored");

        Self {
            identity,
            store,
            state,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn user(&self) -> Option<&Customer> {
        self.state.user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&BearerToken> {
        self.state.token.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Sign in and persist the resulting session.
    ///
    /// # Errors
    ///
    /// Returns the identity API failure; the session is left unchanged.
    pub async fn login(&mut self, email: &str, password: &Password) -> Result<(), SessionError> {
        self.state.is_loading = true;

        let response = self.identity.login(email, password).await;

        self.state.is_loading = false;

        let response = response?;

        if let Err(error) = write_record(self.store.as_ref(), &response.token) {
            error!(error = %error, "failed to store bearer token");
        }

        info!(customer = %response.user.id, "signed in");

        self.state.user = Some(response.user);
        self.state.token = Some(response.token);
        self.state.is_authenticated = true;
        self.persist();

        Ok(())
    }

    /// Create an account, signing in straight away when a password was supplied.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Api`]: registration was rejected.
    /// - [`SessionError::AutoLogin`]: the account exists but the follow-up login
    ///   failed.
    pub async fn register(&mut self, data: RegisterData) -> Result<RegistrationOutcome, SessionError> {
        self.state.is_loading = true;

        let response = self.identity.register(&data).await;

        self.state.is_loading = false;

        let response = response?;

        match (response.customer, data.password) {
            (Some(customer), Some(password)) => {
                info!(customer = %customer.id, "account created, signing in");

                self.login(&data.email, &password)
                    .await
                    .map_err(|error| match error {
                        SessionError::Api(source) | SessionError::AutoLogin { source, .. } => {
                            SessionError::AutoLogin {
                                customer: Box::new(customer),
                                source,
                            }
                        }
                    })?;

                Ok(RegistrationOutcome::Authenticated)
            }
            (customer, _) => {
                info!("account created");

                self.state.user.clone_from(&customer);
                self.persist();

                Ok(RegistrationOutcome::Registered(customer))
            }
        }
    }

    /// Sign out. The local session is always cleared, even when the backend
    /// cannot be reached.
    pub async fn logout(&mut self) {
        if self.state.token.is_some() {
            if let Err(error) = self.identity.logout().await {
                warn!(error = %error, "server logout failed, clearing local session");
            }
        }

        self.clear();

        info!("signed out");
    }

    /// Refresh the customer record. A failure means the token is no longer
    /// valid and the session is cleared.
    pub async fn fetch_current_user(&mut self) {
        self.state.is_loading = true;

        let result = self.identity.current_customer().await;

        self.state.is_loading = false;

        match result {
            Ok(customer) => {
                self.state.user = Some(customer);
                self.persist();
            }
            Err(error) => {
                warn!(error = %error, "session invalidated");
                self.clear();
            }
        }
    }

    /// Apply a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns the identity API failure; the stored user is left unchanged.
    pub async fn update_user(&mut self, update: &CustomerUpdate) -> Result<Customer, SessionError> {
        self.state.is_loading = true;

        let result = self.identity.update_customer(update).await;

        self.state.is_loading = false;

        let customer = result?;

        debug!(customer = %customer.id, "profile updated");

        self.state.user = Some(customer.clone());
        self.persist();

        Ok(customer)
    }

    fn clear(&mut self) {
        if let Err(error) = remove_record::<BearerToken>(self.store.as_ref()) {
            error!(error = %error, "failed to remove bearer token");
        }

        self.state = SessionState::default();
        self.persist();
    }

    fn persist(&self) {
        let session = PersistedSession::from(&self.state);

        if let Err(error) = write_record(self.store.as_ref(), &session) {
            error!(error = %error, "failed to persist session");
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
