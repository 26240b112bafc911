//! Lead database: opportunities and opportunity roles.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::pagination::{OffsetParams, PageTokenParams};
use crate::params::{path_segment, InputBody};
use crate::traits::{DeleteRecords, Describe, Endpoint, QueryRecords, SyncRecords};

const OPPORTUNITIES: &str = "v1/opportunities";
const OPPORTUNITY_ROLES: &str = "v1/opportunityRoles";

/// Opportunity records (`/rest/v1/opportunities`).
#[derive(Debug, Clone, Copy)]
pub struct Opportunities<'a> {
    client: &'a MarketoClient,
}

impl<'a> Opportunities<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    /// Page through all opportunities by offset.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{OPPORTUNITIES}.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, opportunity_id: u64) -> Result<Value> {
        self.client.get(&format!("{OPPORTUNITIES}/{opportunity_id}.json")).await
    }

    /// Create or update opportunities matched on `lookup_field` (server default is
    /// `externalOpportunityId`).
    #[tracing::instrument(skip(self, records))]
    pub async fn upsert<R: Serialize + Sync>(
        &self,
        records: &[R],
        lookup_field: Option<&str>,
    ) -> Result<Value> {
        let body = InputBody::new(records).lookup_field(lookup_field);
        self.client
            .post(&format!("{OPPORTUNITIES}/upsert.json"), &body)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, opportunity_id: u64) -> Result<Value> {
        self.client
            .delete(&format!("{OPPORTUNITIES}/{opportunity_id}.json"))
            .await
    }

    /// Roles attached to an opportunity.
    #[tracing::instrument(skip(self))]
    pub async fn roles(&self, opportunity_id: u64, paging: &PageTokenParams) -> Result<Value> {
        self.client
            .get_with_query(
                &format!("{OPPORTUNITIES}/{opportunity_id}/roles.json"),
                paging,
            )
            .await
    }

    /// Attach roles to an opportunity.
    #[tracing::instrument(skip(self, roles))]
    pub async fn add_roles<R: Serialize + Sync>(
        &self,
        opportunity_id: u64,
        roles: &[R],
    ) -> Result<Value> {
        self.client
            .post(
                &format!("{OPPORTUNITIES}/{opportunity_id}/roles.json"),
                &InputBody::new(roles),
            )
            .await
    }

    /// Detach roles from an opportunity.
    #[tracing::instrument(skip(self, roles))]
    pub async fn remove_roles<R: Serialize + Sync>(
        &self,
        opportunity_id: u64,
        roles: &[R],
    ) -> Result<Value> {
        self.client
            .post(
                &format!("{OPPORTUNITIES}/{opportunity_id}/roles/delete.json"),
                &InputBody::new(roles),
            )
            .await
    }
}

impl Endpoint for Opportunities<'_> {
    fn client(&self) -> &MarketoClient {
        self.client
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(OPPORTUNITIES)
    }
}

impl Describe for Opportunities<'_> {}
impl QueryRecords for Opportunities<'_> {}
impl SyncRecords for Opportunities<'_> {}
impl DeleteRecords for Opportunities<'_> {}

/// Opportunity role records (`/rest/v1/opportunityRoles`).
#[derive(Debug, Clone, Copy)]
pub struct OpportunityRoles<'a> {
    client: &'a MarketoClient,
}

impl<'a> OpportunityRoles<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{OPPORTUNITY_ROLES}.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, role_id: u64) -> Result<Value> {
        self.client
            .get(&format!("{OPPORTUNITY_ROLES}/{role_id}.json"))
            .await
    }

    /// Create or update roles matched on `lookup_field` (server default is
    /// `externalOpportunityRoleId`).
    #[tracing::instrument(skip(self, roles))]
    pub async fn upsert<R: Serialize + Sync>(
        &self,
        roles: &[R],
        lookup_field: Option<&str>,
    ) -> Result<Value> {
        let body = InputBody::new(roles).lookup_field(lookup_field);
        self.client
            .post(&format!("{OPPORTUNITY_ROLES}/upsert.json"), &body)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, role_id: u64) -> Result<Value> {
        self.client
            .delete(&format!("{OPPORTUNITY_ROLES}/{role_id}.json"))
            .await
    }

    /// All role types.
    #[tracing::instrument(skip(self))]
    pub async fn types(&self) -> Result<Value> {
        self.client
            .get(&format!("{OPPORTUNITY_ROLES}/types.json"))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn type_by_name(&self, type_name: &str) -> Result<Value> {
        let path = format!("{OPPORTUNITY_ROLES}/type/{}.json", path_segment(type_name)?);
        self.client.get(&path).await
    }
}
