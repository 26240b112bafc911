//! Describe trait for object metadata.

use async_trait::async_trait;
use serde_json::Value;

use super::Endpoint;
use crate::error::Result;

/// Fetch the field metadata of an object type.
///
/// # Example
///
/// ```ignore
/// use mktoapi::{Describe, MarketoClient};
///
/// let client = MarketoClient::from_env()?;
/// let schema = client.leads().describe().await?;
/// ```
#[async_trait]
pub trait Describe: Endpoint {
    /// `GET {endpoint}/describe.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn describe(&self) -> Result<Value> {
        let path = format!("{}/describe.json", self.endpoint());
        self.client().get(&path).await
    }
}
