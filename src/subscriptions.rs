//! Multiple Marketo subscriptions loaded from a CSV file.
//!
//! The file has a header row and one subscription per line:
//!
//! ```csv
//! munchkin_id,client_id,client_secret,environment
//! 123-ABC-456,0f1e2d3c,s3cret,production
//! 789-DEF-012,4b5a6978,s3cret2,sandbox
//! ```
//!
//! `environment` is optional.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;

use crate::auth::Credentials;
use crate::error::{MarketoError, Result};

const REQUIRED_COLUMNS: [&str; 3] = ["munchkin_id", "client_id", "client_secret"];

/// One row of a subscriptions file.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Subscription {
    pub munchkin_id: String,
    pub client_id: String,
    client_secret: String,
    #[serde(default)]
    pub environment: Option<String>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("munchkin_id", &self.munchkin_id)
            .field("client_id", &self.client_id)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

impl Subscription {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.munchkin_id, &self.client_id, &self.client_secret)
    }
}

/// All subscriptions of a file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    entries: Vec<Subscription>,
}

impl Subscriptions {
    /// Load subscriptions from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`MarketoError::Configuration`] if the file cannot be opened,
    /// lacks a required column, or has a malformed row.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            MarketoError::Configuration(format!(
                "cannot open subscriptions file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_reader(file)
    }

    /// Load subscriptions from any CSV source.
    ///
    /// # Errors
    ///
    /// Same as [`from_path`](Self::from_path).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(MarketoError::Configuration(format!(
                    "subscriptions file is missing the {column} column \
                     (expected munchkin_id, client_id, client_secret, environment)"
                )));
            }
        }

        let entries = reader
            .deserialize()
            .collect::<std::result::Result<Vec<Subscription>, _>>()?;

        tracing::debug!(count = entries.len(), "Loaded Marketo subscriptions");
        Ok(Self { entries })
    }

    pub fn get(&self, index: usize) -> Option<&Subscription> {
        self.entries.get(index)
    }

    /// First subscription with the given munchkin id.
    pub fn find(&self, munchkin_id: &str) -> Option<&Subscription> {
        self.entries
            .iter()
            .find(|s| s.munchkin_id.eq_ignore_ascii_case(munchkin_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subscription> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Subscriptions {
    type Item = &'a Subscription;
    type IntoIter = std::slice::Iter<'a, Subscription>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
