//! `reqwest` binding for the storefront backend.

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use storefront::prelude::{Customer, CustomerUpdate, OrderSubmission, Password, RegisterData};
use tracing::debug;

use crate::{
    api::{
        ApiError, BearerToken, IdentityApi, OrdersApi,
        models::{ErrorBody, LoginRequest, LoginResponse, PlacedOrder, RegisterResponse},
    },
    storage::{KeyValueStore, read_record},
};

/// Connection settings for [`HttpStorefrontClient`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Backend base URL, e.g. `"https://shop.example.com/api"`.
    pub base_url: String,

    /// Per-request timeout. No timeout when absent.
    pub timeout: Option<Duration>,
}

/// JSON-over-HTTP client implementing both collaborator traits.
///
/// The bearer token is read from the token slot on every request, so a login or
/// logout performed through the session is picked up without rebuilding the
/// client.
#[derive(Clone)]
pub struct HttpStorefrontClient {
    base_url: String,
    http: Client,
    credentials: Arc<dyn KeyValueStore>,
}

impl HttpStorefrontClient {
    /// Build a client for `config`, reading credentials from `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be constructed.
    pub fn new(config: HttpConfig, credentials: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
            credentials,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        debug!(%method, path, "storefront api request");

        let request = self.http.request(method, self.url(path));

        Ok(match read_record::<BearerToken>(self.credentials.as_ref())? {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        })
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::check(request.send().await?).await?;

        Ok(response.json().await?)
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = rejection_message(&text);

        debug!(status = status.as_u16(), "storefront api request rejected");

        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// The `message` of a rejected request's JSON body, when it carries readable text.
fn rejection_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}

impl fmt::Debug for HttpStorefrontClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStorefrontClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityApi for HttpStorefrontClient {
    async fn login(&self, email: &str, password: &Password) -> Result<LoginResponse, ApiError> {
        let request = self
            .request(Method::POST, "/auth/login")?
            .json(&LoginRequest { email, password });

        Self::send(request).await
    }

    async fn register(&self, data: &RegisterData) -> Result<RegisterResponse, ApiError> {
        let request = self.request(Method::POST, "/auth/register")?.json(data);

        Self::send(request).await
    }

    async fn current_customer(&self) -> Result<Customer, ApiError> {
        Self::send(self.request(Method::GET, "/customers/me")?).await
    }

    async fn update_customer(&self, update: &CustomerUpdate) -> Result<Customer, ApiError> {
        let request = self.request(Method::PATCH, "/customers/me")?.json(update);

        Self::send(request).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let request = self.request(Method::POST, "/auth/logout")?;

        Self::check(request.send().await?).await?;

        Ok(())
    }
}

#[async_trait]
impl OrdersApi for HttpStorefrontClient {
    async fn create_guest_order(&self, order: &OrderSubmission) -> Result<PlacedOrder, ApiError> {
        let request = self.request(Method::POST, "/orders/guest")?.json(order);

        Self::send(request).await
    }

    async fn create_order(&self, order: &OrderSubmission) -> Result<PlacedOrder, ApiError> {
        let request = self.request(Method::POST, "/orders")?.json(order);

        Self::send(request).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;
    use testresult::TestResult;

    use crate::storage::{MemoryStore, write_record};

    use super::*;

    fn client(store: Arc<MemoryStore>) -> Result<HttpStorefrontClient, ApiError> {
        HttpStorefrontClient::new(
            HttpConfig {
                base_url: "https://shop.example.com/api/".to_string(),
                timeout: Some(Duration::from_secs(5)),
            },
            store,
        )
    }

    #[test]
    fn trailing_slash_is_dropped_from_base_url() -> TestResult {
        let client = client(Arc::new(MemoryStore::new()))?;

        assert_eq!(client.base_url(), "https://shop.example.com/api");
        assert_eq!(
            client.url("/orders/guest"),
            "https://shop.example.com/api/orders/guest"
        );

        Ok(())
    }

    #[test]
    fn stored_token_is_sent_as_bearer() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        write_record(store.as_ref(), &BearerToken::new("abc"))?;

        let request = client(store)?
            .request(Method::GET, "/customers/me")?
            .build()?;

        assert_eq!(
            request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok()),
            Some("Bearer abc")
        );
        assert_eq!(request.url().path(), "/api/customers/me");

        Ok(())
    }

    #[test]
    fn rejection_message_reads_json_body() {
        assert_eq!(
            rejection_message(r#"{"message":"Email already registered"}"#).as_deref(),
            Some("Email already registered")
        );
    }

    #[test]
    fn rejection_message_ignores_non_json_body() {
        assert_eq!(rejection_message("<html>502 Bad Gateway</html>"), None);
        assert_eq!(rejection_message(""), None);
    }

    #[test]
    fn rejection_message_ignores_blank_or_missing_message() {
        assert_eq!(rejection_message(r#"{"message":"   "}"#), None);
        assert_eq!(rejection_message(r#"{"message":null}"#), None);
        assert_eq!(rejection_message(r#"{"error":"bad request"}"#), None);
    }

    #[test]
    fn requests_are_anonymous_without_token() -> TestResult {
        let request = client(Arc::new(MemoryStore::new()))?
            .request(Method::POST, "/orders/guest")?
            .build()?;

        assert!(request.headers().get(AUTHORIZATION).is_none());

        Ok(())
    }
}
