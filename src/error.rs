//! Error types for Marketo API operations.

use thiserror::Error;

/// Errors that can occur during Marketo API operations.
#[derive(Debug, Error)]
pub enum MarketoError {
    /// Credentials or client configuration are missing or incomplete.
    #[error("Marketo configuration error: {0}")]
    Configuration(String),

    /// The token exchange with the identity endpoint failed.
    #[error("Marketo authentication failed: {message}")]
    Authentication {
        message: String,
        status_code: Option<u16>,
    },

    /// A resource endpoint answered with a non-success status.
    #[error("Marketo API returned HTTP {status}: {body}")]
    RemoteRequest { status: u16, body: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl MarketoError {
    /// HTTP status attached to the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { status_code, .. } => *status_code,
            Self::RemoteRequest { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the server rejected the request as unauthorized.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }
}

impl From<csv::Error> for MarketoError {
    fn from(err: csv::Error) -> Self {
        Self::Configuration(format!("unreadable subscriptions file: {err}"))
    }
}

/// Result type alias for Marketo operations.
pub type Result<T> = core::result::Result<T, MarketoError>;
