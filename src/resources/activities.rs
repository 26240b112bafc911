//! Activities: the activity log, lead changes and custom activity types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::params::{
    comma_separated, comma_separated_opt, is_none_or_empty, path_segment, require_values,
    InputBody,
};

const ACTIVITIES: &str = "v1/activities";

/// Activity records (`/rest/v1/activities`).
///
/// Reads are driven by a paging token: get one for a start time with
/// [`paging_token`](Self::paging_token), then pass it to
/// [`list`](Self::list), [`lead_changes`](Self::lead_changes) or
/// [`deleted_leads`](Self::deleted_leads) and follow `nextPageToken`.
#[derive(Debug, Clone, Copy)]
pub struct Activities<'a> {
    client: &'a MarketoClient,
}

/// Filters for reading the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    pub next_page_token: String,

    #[serde(
        serialize_with = "comma_separated_opt::serialize",
        skip_serializing_if = "is_none_or_empty"
    )]
    pub activity_type_ids: Option<Vec<u64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<u64>,

    #[serde(
        serialize_with = "comma_separated_opt::serialize",
        skip_serializing_if = "is_none_or_empty"
    )]
    pub lead_ids: Option<Vec<u64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
}

impl ActivityQuery {
    pub fn new(next_page_token: impl Into<String>) -> Self {
        Self {
            next_page_token: next_page_token.into(),
            activity_type_ids: None,
            list_id: None,
            lead_ids: None,
            batch_size: None,
        }
    }

    #[must_use]
    pub fn activity_type_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.activity_type_ids = Some(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn list_id(mut self, list_id: u64) -> Self {
        self.list_id = Some(list_id);
        self
    }

    #[must_use]
    pub fn lead_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.lead_ids = Some(ids.into_iter().collect());
        self
    }
}

/// Definition of a custom activity type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomActivityType {
    pub api_name: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub primary_attribute: Value,
    pub attributes: Vec<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SinceQuery {
    since_datetime: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LeadChangesParams<'a> {
    next_page_token: &'a str,
    #[serde(serialize_with = "comma_separated::serialize")]
    fields: Vec<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenParam<'a> {
    next_page_token: &'a str,
}

#[derive(Serialize)]
struct AttributesBody<'a> {
    attributes: &'a [Value],
}

impl<'a> Activities<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    /// Standard and custom activity types.
    #[tracing::instrument(skip(self))]
    pub async fn types(&self) -> Result<Value> {
        self.client
            .get(&format!("{ACTIVITIES}/types.json"))
            .await
    }

    /// Paging token positioned at `since`.
    #[tracing::instrument(skip(self))]
    pub async fn paging_token(&self, since: DateTime<Utc>) -> Result<Value> {
        self.client
            .get_with_query(
                &format!("{ACTIVITIES}/pagingToken.json"),
                &SinceQuery {
                    since_datetime: since,
                },
            )
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: &ActivityQuery) -> Result<Value> {
        self.client
            .get_with_query(&format!("{ACTIVITIES}.json"), query)
            .await
    }

    /// Data value changes on leads, limited to `fields`.
    ///
    /// # Errors
    ///
    /// [`MarketoError::Configuration`](crate::MarketoError::Configuration) if
    /// `fields` is empty; nothing is sent.
    #[tracing::instrument(skip(self))]
    pub async fn lead_changes(&self, next_page_token: &str, fields: &[&str]) -> Result<Value> {
        require_values("fields", fields)?;
        let params = LeadChangesParams {
            next_page_token,
            fields: fields.to_vec(),
        };
        self.client
            .get_with_query(&format!("{ACTIVITIES}/leadchanges.json"), &params)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn deleted_leads(&self, next_page_token: &str) -> Result<Value> {
        self.client
            .get_with_query(
                &format!("{ACTIVITIES}/deletedleads.json"),
                &TokenParam { next_page_token },
            )
            .await
    }

    /// Create a custom activity type.
    #[tracing::instrument(skip(self, activity_type), fields(api_name = %activity_type.api_name))]
    pub async fn create_type(&self, activity_type: &CustomActivityType) -> Result<Value> {
        self.client
            .post(&format!("{ACTIVITIES}/external/type.json"), activity_type)
            .await
    }

    #[tracing::instrument(skip(self, attributes))]
    pub async fn create_attributes(&self, api_name: &str, attributes: &[Value]) -> Result<Value> {
        self.attributes(api_name, "create", attributes).await
    }

    #[tracing::instrument(skip(self, attributes))]
    pub async fn update_attributes(&self, api_name: &str, attributes: &[Value]) -> Result<Value> {
        self.attributes(api_name, "update", attributes).await
    }

    #[tracing::instrument(skip(self, attributes))]
    pub async fn delete_attributes(&self, api_name: &str, attributes: &[Value]) -> Result<Value> {
        self.attributes(api_name, "delete", attributes).await
    }

    /// Record custom activities.
    #[tracing::instrument(skip(self, activities))]
    pub async fn add<R: Serialize + Sync>(&self, activities: &[R]) -> Result<Value> {
        self.client
            .post(
                &format!("{ACTIVITIES}/external.json"),
                &InputBody::new(activities),
            )
            .await
    }

    async fn attributes(&self, api_name: &str, op: &str, attributes: &[Value]) -> Result<Value> {
        let path = format!(
            "{ACTIVITIES}/external/type/{}/attributes/{op}.json",
            path_segment(api_name)?
        );
        self.client
            .post(&path, &AttributesBody { attributes })
            .await
    }
}
