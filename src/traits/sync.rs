//! Sync trait for creating and updating records.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::Endpoint;
use crate::error::Result;
use crate::params::{DedupeBy, SyncAction, SyncOptions};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncBody<'a, R> {
    input: &'a [R],
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<SyncAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dedupe_by: Option<DedupeBy>,
}

/// Create or update records in bulk.
///
/// Records are any serializable values; `serde_json::Value` works for
/// ad-hoc field sets.
///
/// # Example
///
/// ```ignore
/// use mktoapi::{MarketoClient, SyncAction, SyncOptions, SyncRecords};
/// use serde_json::json;
///
/// let client = MarketoClient::from_env()?;
/// let leads = vec![json!({"email": "jane@example.com", "firstName": "Jane"})];
/// let result = client
///     .leads()
///     .sync(&leads, &SyncOptions::default().action(SyncAction::CreateOnly))
///     .await?;
/// ```
#[async_trait]
pub trait SyncRecords: Endpoint {
    /// `POST {endpoint}.json` with `{input, action?, dedupeBy?}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn sync<R>(&self, records: &[R], options: &SyncOptions) -> Result<Value>
    where
        R: Serialize + Sync,
    {
        let path = format!("{}.json", self.endpoint());
        let body = SyncBody {
            input: records,
            action: options.action,
            dedupe_by: options.dedupe_by,
        };
        self.client().post(&path, &body).await
    }
}
