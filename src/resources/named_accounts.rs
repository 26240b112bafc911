//! Lead database: named accounts and named account lists.

use serde::Serialize;
use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::pagination::OffsetParams;
use crate::params::{IdsBody, InputBody};

const NAMED_ACCOUNTS: &str = "v1/namedAccounts";
const NAMED_ACCOUNT_LISTS: &str = "v1/namedAccounts/lists";

/// Named accounts (`/rest/v1/namedAccounts`).
#[derive(Debug, Clone, Copy)]
pub struct NamedAccounts<'a> {
    client: &'a MarketoClient,
}

/// Body for creating a named account list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNamedAccountList {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for updating a named account list. Unset fields are left as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamedAccountListUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl<'a> NamedAccounts<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{NAMED_ACCOUNTS}.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, account_id: u64) -> Result<Value> {
        self.client
            .get(&format!("{NAMED_ACCOUNTS}/{account_id}.json"))
            .await
    }

    /// Create or update accounts matched on `lookup_field` (server default
    /// is `externalCompanyId`).
    #[tracing::instrument(skip(self, accounts))]
    pub async fn upsert<R: Serialize + Sync>(
        &self,
        accounts: &[R],
        lookup_field: Option<&str>,
    ) -> Result<Value> {
        let body = InputBody::new(accounts).lookup_field(lookup_field);
        self.client
            .post(&format!("{NAMED_ACCOUNTS}/upsert.json"), &body)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, account_id: u64) -> Result<Value> {
        self.client
            .delete(&format!("{NAMED_ACCOUNTS}/{account_id}.json"))
            .await
    }

    /// All named account lists.
    #[tracing::instrument(skip(self))]
    pub async fn lists(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{NAMED_ACCOUNT_LISTS}.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_by_id(&self, list_id: u64) -> Result<Value> {
        self.client
            .get(&format!("{NAMED_ACCOUNT_LISTS}/{list_id}.json"))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_list(&self, list: &NewNamedAccountList) -> Result<Value> {
        self.client
            .post(&format!("{NAMED_ACCOUNT_LISTS}.json"), list)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_list(&self, list_id: u64, update: &NamedAccountListUpdate) -> Result<Value> {
        self.client
            .put(&format!("{NAMED_ACCOUNT_LISTS}/{list_id}.json"), update)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_list(&self, list_id: u64) -> Result<Value> {
        self.client
            .delete(&format!("{NAMED_ACCOUNT_LISTS}/{list_id}.json"))
            .await
    }

    /// Add accounts to a list.
    #[tracing::instrument(skip(self))]
    pub async fn add_to_list(&self, list_id: u64, account_ids: &[u64]) -> Result<Value> {
        self.client
            .post(
                &format!("{NAMED_ACCOUNT_LISTS}/{list_id}/members.json"),
                &IdsBody { id: account_ids },
            )
            .await
    }

    /// Remove accounts from a list.
    #[tracing::instrument(skip(self))]
    pub async fn remove_from_list(&self, list_id: u64, account_ids: &[u64]) -> Result<Value> {
        self.client
            .delete_with_body(
                &format!("{NAMED_ACCOUNT_LISTS}/{list_id}/members.json"),
                &IdsBody { id: account_ids },
            )
            .await
    }
}
