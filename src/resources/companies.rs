//! Lead database: companies.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::pagination::{OffsetParams, PageTokenParams};
use crate::params::{path_segment, InputBody};
use crate::traits::{DeleteRecords, Describe, Endpoint, QueryRecords, SyncRecords};

const COMPANIES: &str = "v1/companies";

/// Company records (`/rest/v1/companies`).
#[derive(Debug, Clone, Copy)]
pub struct Companies<'a> {
    client: &'a MarketoClient,
}

impl<'a> Companies<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    /// Page through all companies by offset.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{COMPANIES}.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, company_id: u64) -> Result<Value> {
        self.client.get(&format!("{COMPANIES}/{company_id}.json")).await
    }

    /// Create or update companies matched on `lookup_field` (server default is
    /// `externalCompanyId`).
    #[tracing::instrument(skip(self, records))]
    pub async fn upsert<R: Serialize + Sync>(
        &self,
        records: &[R],
        lookup_field: Option<&str>,
    ) -> Result<Value> {
        let body = InputBody::new(records).lookup_field(lookup_field);
        self.client
            .post(&format!("{COMPANIES}/upsert.json"), &body)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, company_id: u64) -> Result<Value> {
        self.client
            .delete(&format!("{COMPANIES}/{company_id}.json"))
            .await
    }

    /// Metadata for every field on the company object.
    #[tracing::instrument(skip(self))]
    pub async fn fields(&self, paging: &PageTokenParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{COMPANIES}/schema/fields.json"), paging)
            .await
    }

    /// Metadata for one company field.
    #[tracing::instrument(skip(self))]
    pub async fn field(&self, field_name: &str) -> Result<Value> {
        let path = format!("{COMPANIES}/schema/fields/{}.json", path_segment(field_name)?);
        self.client.get(&path).await
    }
}

impl Endpoint for Companies<'_> {
    fn client(&self) -> &MarketoClient {
        self.client
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(COMPANIES)
    }
}

impl Describe for Companies<'_> {}
impl QueryRecords for Companies<'_> {}
impl SyncRecords for Companies<'_> {}
impl DeleteRecords for Companies<'_> {}
