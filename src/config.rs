//! Client configuration.
//!
//! Everything here is read once when a [`MarketoClient`](crate::MarketoClient)
//! is built; nothing is reloaded afterwards.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{MarketoError, Result};

/// Host suffix appended to the munchkin id to form the instance URL.
pub const API_HOST_SUFFIX: &str = "mktorest.com";

/// Default timeout applied to every outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) const ENV_MUNCHKIN_ID: &str = "MARKETO_MUNCHKIN_ID";
pub(crate) const ENV_CLIENT_ID: &str = "MARKETO_CLIENT_ID";
pub(crate) const ENV_CLIENT_SECRET: &str = "MARKETO_CLIENT_SECRET";
const ENV_INSTANCE_URL: &str = "MARKETO_INSTANCE_URL";
const ENV_TIMEOUT_SECS: &str = "MARKETO_TIMEOUT_SECS";

/// Transport settings for a [`MarketoClient`](crate::MarketoClient).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use mktoapi::ClientConfig;
///
/// # fn example() -> mktoapi::Result<()> {
/// let config = ClientConfig::default()
///     .with_instance_url("http://localhost:8080")?
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout, Duration::from_secs(10));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Overrides `https://{munchkin_id}.mktorest.com/`. Useful for proxies
    /// and mock servers.
    pub instance_url: Option<Url>,

    /// Timeout for each request, token exchanges included.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            instance_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Read optional settings from the environment.
    ///
    /// Uses `MARKETO_INSTANCE_URL` and `MARKETO_TIMEOUT_SECS` when set.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var(ENV_INSTANCE_URL) {
            config = config.with_instance_url(&url)?;
        }

        if let Ok(secs) = env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                MarketoError::Configuration(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{secs}'"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Point the client at a specific instance URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_instance_url(mut self, url: &str) -> Result<Self> {
        self.instance_url = Some(Url::parse(&with_trailing_slash(url))?);
        Ok(self)
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the instance URL for a munchkin id.
    pub(crate) fn instance_url_for(&self, munchkin_id: &str) -> Result<Url> {
        if let Some(url) = &self.instance_url {
            return Ok(url.clone());
        }

        if munchkin_id.trim().is_empty() {
            return Err(MarketoError::Configuration(
                "munchkin id is empty".to_string(),
            ));
        }

        Ok(Url::parse(&format!("https://{munchkin_id}.{API_HOST_SUFFIX}/"))?)
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
