//! Lead database: sales persons.

use std::borrow::Cow;

use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::pagination::PageTokenParams;
use crate::traits::{DeleteRecords, Endpoint, SyncRecords};

const SALES_PERSONS: &str = "v1/salespersons";

/// Sales person records (`/rest/v1/salespersons`).
///
/// Sync accepts only an action; delete takes no `deleteBy`.
#[derive(Debug, Clone, Copy)]
pub struct SalesPersons<'a> {
    client: &'a MarketoClient,
}

impl<'a> SalesPersons<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, paging: &PageTokenParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{SALES_PERSONS}.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, sales_person_id: u64) -> Result<Value> {
        self.client
            .get(&format!("{SALES_PERSONS}/{sales_person_id}.json"))
            .await
    }

    /// Opportunities owned by a sales person.
    #[tracing::instrument(skip(self))]
    pub async fn opportunities(
        &self,
        sales_person_id: u64,
        paging: &PageTokenParams,
    ) -> Result<Value> {
        self.client
            .get_with_query(
                &format!("{SALES_PERSONS}/{sales_person_id}/opportunities.json"),
                paging,
            )
            .await
    }
}

impl Endpoint for SalesPersons<'_> {
    fn client(&self) -> &MarketoClient {
        self.client
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(SALES_PERSONS)
    }
}

impl SyncRecords for SalesPersons<'_> {}
impl DeleteRecords for SalesPersons<'_> {}
