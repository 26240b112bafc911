//! Delete trait for removing records in bulk.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::Endpoint;
use crate::error::Result;
use crate::params::DeleteBy;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBody<'a, R> {
    input: &'a [R],
    #[serde(skip_serializing_if = "Option::is_none")]
    delete_by: Option<DeleteBy>,
}

/// Delete records identified by dedupe fields or ids.
#[async_trait]
pub trait DeleteRecords: Endpoint {
    /// `POST {endpoint}/delete.json` with `{input, deleteBy?}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn delete<R>(&self, records: &[R], delete_by: Option<DeleteBy>) -> Result<Value>
    where
        R: Serialize + Sync,
    {
        let path = format!("{}/delete.json", self.endpoint());
        let body = DeleteBody {
            input: records,
            delete_by,
        };
        self.client().post(&path, &body).await
    }
}
