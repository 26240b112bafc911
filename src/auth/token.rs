//! Bearer token acquisition and caching.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use url::Url;

use super::credentials::Credentials;
use crate::error::{MarketoError, Result};

/// Lifetime assumed when the identity endpoint omits `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 60;

/// Upper bound on a server-declared lifetime.
const MAX_TOKEN_LIFETIME_SECS: u64 = 86_400;

/// A bearer token and the instant it stops being valid.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

impl Token {
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// The bearer value sent in the `Authorization` header.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A token is expired once its expiry instant is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Identity endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Acquires bearer tokens on demand and reuses them until they expire.
///
/// The cached token lives behind an async mutex that is held for the whole
/// check-and-exchange, so concurrent callers that find the token expired wait
/// for a single exchange instead of racing their own.
///
/// # Example
///
/// ```no_run
/// use mktoapi::{Credentials, TokenManager};
///
/// # async fn example() -> mktoapi::Result<()> {
/// let token_url: reqwest::Url = "https://123-ABC-456.mktorest.com/identity/oauth/token".parse()?;
/// let manager = TokenManager::new(
///     reqwest::Client::new(),
///     token_url,
///     Credentials::new("123-ABC-456", "client-id", "client-secret"),
/// );
///
/// let token = manager.get_token().await?;
/// println!("token valid until {}", token.expires_at());
/// # Ok(())
/// # }
/// ```
pub struct TokenManager {
    http: Client,
    token_url: Url,
    credentials: Credentials,
    slot: Mutex<Option<Token>>,
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("token_url", &self.token_url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Create a manager that exchanges `credentials` at `token_url`.
    ///
    /// No request is made until [`get_token`](Self::get_token) is called.
    pub fn new(http: Client, token_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            token_url,
            credentials,
            slot: Mutex::new(None),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Return a valid token, exchanging credentials for a new one if none is
    /// cached or the cached one has expired.
    ///
    /// # Errors
    ///
    /// - [`MarketoError::Configuration`] if the credentials are incomplete
    ///   (no request is made).
    /// - [`MarketoError::Authentication`] if the identity endpoint rejects the
    ///   credentials or answers without an access token.
    #[tracing::instrument(skip(self))]
    pub async fn get_token(&self) -> Result<Token> {
        self.credentials.validate()?;

        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref() {
            if !token.is_expired() {
                return Ok(token.clone());
            }
            tracing::debug!(expired_at = %token.expires_at, "Cached access token expired");
        }

        let token = self.exchange().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    /// The cached token, if any, without refreshing it.
    ///
    /// Shares the lock held during an exchange, so a call made while a refresh
    /// is in flight waits for that refresh and sees its result.
    pub async fn current(&self) -> Option<Token> {
        self.slot.lock().await.clone()
    }

    /// Drop the cached token so the next [`get_token`](Self::get_token)
    /// performs a fresh exchange.
    ///
    /// Waits for an in-flight exchange, then drops the token it produced.
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }

    async fn exchange(&self) -> Result<Token> {
        tracing::debug!(
            munchkin_id = self.credentials.munchkin_id(),
            "Requesting access token"
        );

        let response = self
            .http
            .get(self.token_url.clone())
            .query(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id()),
                ("client_secret", self.credentials.client_secret()),
            ])
            .send()
            .await
            .map_err(MarketoError::HttpError)?;

        let status = response.status();
        let body = response.text().await.map_err(MarketoError::HttpError)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Token exchange rejected");
            return Err(MarketoError::Authentication {
                message: failure_message(&body, status),
                status_code: Some(status.as_u16()),
            });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| MarketoError::Authentication {
                message: format!("malformed token response: {e}"),
                status_code: Some(status.as_u16()),
            })?;

        let access_token = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MarketoError::Authentication {
                message: format!(
                    "token response has no access_token: {}",
                    failure_message(&body, status)
                ),
                status_code: Some(status.as_u16()),
            })?;

        let lifetime = parsed
            .expires_in
            .map(|secs| secs.min(MAX_TOKEN_LIFETIME_SECS) as i64)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);

        tracing::info!(expires_in = lifetime, "Acquired Marketo access token");

        Ok(Token::new(access_token, Utc::now() + Duration::seconds(lifetime)))
    }
}

/// Pull a human-readable reason out of an identity error body.
fn failure_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "error", "message"] {
            if let Some(msg) = json.get(key).and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }
    }

    if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_string()
    }
}
