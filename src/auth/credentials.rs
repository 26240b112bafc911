//! Client credentials for the Marketo identity endpoint.

use std::env;
use std::fmt;

use crate::config::{ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_MUNCHKIN_ID};
use crate::error::{MarketoError, Result};

/// Munchkin id plus the client id/secret of a LaunchPoint custom service.
///
/// Immutable once built. Completeness is checked lazily, the first time a
/// token is requested.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    munchkin_id: String,
    client_id: String,
    client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("munchkin_id", &self.munchkin_id)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(
        munchkin_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            munchkin_id: munchkin_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read credentials from `MARKETO_MUNCHKIN_ID`, `MARKETO_CLIENT_ID` and
    /// `MARKETO_CLIENT_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the variables is not set.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            env::var(name).map_err(|_| {
                MarketoError::Configuration(format!("{name} environment variable not set"))
            })
        };

        Ok(Self::new(
            read(ENV_MUNCHKIN_ID)?,
            read(ENV_CLIENT_ID)?,
            read(ENV_CLIENT_SECRET)?,
        ))
    }

    pub fn munchkin_id(&self) -> &str {
        &self.munchkin_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Check that no part of the credentials is blank.
    ///
    /// # Errors
    ///
    /// Returns [`MarketoError::Configuration`] naming the first empty part.
    pub fn validate(&self) -> Result<()> {
        let parts = [
            ("munchkin id", &self.munchkin_id),
            ("client id", &self.client_id),
            ("client secret", &self.client_secret),
        ];

        for (name, value) in parts {
            if value.trim().is_empty() {
                return Err(MarketoError::Configuration(format!("{name} is empty")));
            }
        }

        Ok(())
    }
}
