//! Query trait for filtered record lookups.

use async_trait::async_trait;
use serde_json::Value;

use super::Endpoint;
use crate::error::Result;
use crate::params::FilterQuery;

/// Look up records by one of the object's searchable fields.
///
/// # Example
///
/// ```ignore
/// use mktoapi::{FilterQuery, MarketoClient, QueryRecords};
///
/// let client = MarketoClient::from_env()?;
/// let query = FilterQuery::new("email", ["jane@example.com"]).fields(["id", "email"]);
/// let leads = client.leads().query(&query).await?;
/// ```
#[async_trait]
pub trait QueryRecords: Endpoint {
    /// `GET {endpoint}.json?filterType=..&filterValues=..`
    ///
    /// # Arguments
    ///
    /// * `query` - Filter, returned fields and paging
    ///
    /// # Errors
    ///
    /// Returns [`MarketoError::Configuration`](crate::MarketoError::Configuration)
    /// without sending anything if `filter_type` or `filter_values` is empty,
    /// or an error if the request fails.
    async fn query(&self, query: &FilterQuery) -> Result<Value> {
        query.validate()?;
        let path = format!("{}.json", self.endpoint());
        self.client().get_with_query(&path, query).await
    }
}
