//! Marketo API client.
//!
//! Low-level HTTP client that handles authorization and raw requests.
//! Resource-specific operations live on the resource family handles and the shared
//! record traits.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::auth::{Credentials, Token, TokenManager};
use crate::config::ClientConfig;
use crate::error::{MarketoError, Result};

const USER_AGENT: &str = concat!("mktoapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Marketo API client.
///
/// Attaches a bearer token from the shared [`TokenManager`] to every request
/// and decodes responses as opaque JSON. Resource families are reached
/// through accessors such as [`leads`](Self::leads).
///
/// This struct is cheaply cloneable; clones share the connection pool and
/// the cached token.
///
/// # Example
///
/// ```no_run
/// use mktoapi::{ClientConfig, Credentials, MarketoClient};
///
/// # async fn example() -> mktoapi::Result<()> {
/// // Create from environment variables
/// let client = MarketoClient::from_env()?;
///
/// // Or configure manually
/// let client = MarketoClient::new(Credentials::new(
///     "123-ABC-456",
///     "client-id",
///     "client-secret",
/// ))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MarketoClient {
    http: Client,
    base_url: Arc<Url>,
    tokens: Arc<TokenManager>,
}

impl std::fmt::Debug for MarketoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketoClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl MarketoClient {
    /// Create a client from environment variables.
    ///
    /// Credentials come from `MARKETO_MUNCHKIN_ID`, `MARKETO_CLIENT_ID` and
    /// `MARKETO_CLIENT_SECRET`; see [`ClientConfig::from_env`] for the
    /// optional transport settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set or an optional one
    /// is malformed.
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::from_env()?;
        let config = ClientConfig::from_env()?;
        Self::with_config(credentials, config)
    }

    /// Create a client for the instance named by the credentials' munchkin id.
    ///
    /// # Errors
    ///
    /// Returns an error if the munchkin id is empty or the HTTP client
    /// cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with explicit transport settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the instance URL cannot be resolved or the HTTP
    /// client cannot be built.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let instance_url = config.instance_url_for(credentials.munchkin_id())?;
        let base_url = instance_url.join("rest/")?;
        let token_url = instance_url.join("identity/oauth/token")?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(MarketoError::HttpError)?;

        let tokens = TokenManager::new(http.clone(), token_url, credentials);

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            tokens: Arc::new(tokens),
        })
    }

    /// Get the REST base URL (`.../rest/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The token manager shared by every clone of this client.
    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    /// Get a valid access token, exchanging credentials if needed.
    pub async fn access_token(&self) -> Result<Token> {
        self.tokens.get_token().await
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Value> {
        let request = self.authorized(Method::GET, path).await?;
        Self::execute(request).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Value> {
        let request = self.authorized(Method::GET, path).await?.query(query);
        Self::execute(request).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let request = self.authorized(Method::POST, path).await?.json(body);
        Self::execute(request).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let request = self.authorized(Method::PUT, path).await?.json(body);
        Self::execute(request).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Value> {
        let request = self.authorized(Method::DELETE, path).await?;
        Self::execute(request).await
    }

    /// Make a DELETE request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn delete_with_body<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value> {
        let request = self.authorized(Method::DELETE, path).await?.json(body);
        Self::execute(request).await
    }

    /// Resolve `path` against the REST base and attach the bearer token.
    async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let token = self.tokens.get_token().await?;

        Ok(self
            .http
            .request(method, url)
            .bearer_auth(token.access_token()))
    }

    /// Send the request and decode the body, mapping non-2xx to an error.
    async fn execute(request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(MarketoError::HttpError)?;
        let status = response.status();
        let body = response.text().await.map_err(MarketoError::HttpError)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Marketo request failed");
            return Err(MarketoError::RemoteRequest {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}
