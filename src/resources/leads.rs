//! Lead database: leads.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::params::{comma_separated_opt, is_none_or_empty, InputBody};
use crate::traits::{DeleteRecords, Describe, Endpoint, QueryRecords, SyncRecords};

const LEADS: &str = "v1/leads";

/// Lead records (`/rest/v1/leads`).
///
/// Supports [`Describe`], [`QueryRecords`], [`SyncRecords`] and
/// [`DeleteRecords`] in addition to the lead-specific calls below.
#[derive(Debug, Clone, Copy)]
pub struct Leads<'a> {
    client: &'a MarketoClient,
}

/// Filters for a single lead's activity history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadActivityQuery {
    #[serde(
        serialize_with = "comma_separated_opt::serialize",
        skip_serializing_if = "is_none_or_empty"
    )]
    pub activity_type_ids: Option<Vec<u64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Lead changes within a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadChangesQuery {
    pub start_date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(
        serialize_with = "comma_separated_opt::serialize",
        skip_serializing_if = "is_none_or_empty"
    )]
    pub fields: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl LeadChangesQuery {
    pub fn since(start_date: DateTime<Utc>) -> Self {
        Self {
            start_date,
            end_date: None,
            fields: None,
            batch_size: None,
            next_page_token: None,
        }
    }
}

#[derive(Serialize)]
struct EmailLookup<'a> {
    email: &'a str,
}

impl<'a> Leads<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    /// Get a lead by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, lead_id: u64) -> Result<Value> {
        self.client.get(&format!("{LEADS}/{lead_id}.json")).await
    }

    /// Find leads by email address.
    #[tracing::instrument(skip(self))]
    pub async fn lookup_by_email(&self, email: &str) -> Result<Value> {
        self.client
            .get_with_query(&format!("{LEADS}/lookup.json"), &EmailLookup { email })
            .await
    }

    /// Create or update leads matched on `lookup_field` (server default is
    /// `email`).
    #[tracing::instrument(skip(self, records))]
    pub async fn upsert<R: Serialize + Sync>(
        &self,
        records: &[R],
        lookup_field: Option<&str>,
    ) -> Result<Value> {
        let body = InputBody::new(records).lookup_field(lookup_field);
        self.client
            .post(&format!("{LEADS}/upsert.json"), &body)
            .await
    }

    /// Delete a single lead by id.
    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, lead_id: u64) -> Result<Value> {
        self.client.delete(&format!("{LEADS}/{lead_id}.json")).await
    }

    /// Activity history of one lead.
    #[tracing::instrument(skip(self))]
    pub async fn activities(&self, lead_id: u64, query: &LeadActivityQuery) -> Result<Value> {
        self.client
            .get_with_query(&format!("{LEADS}/{lead_id}/activities.json"), query)
            .await
    }

    /// Changes to leads within a date range.
    #[tracing::instrument(skip(self))]
    pub async fn changes(&self, query: &LeadChangesQuery) -> Result<Value> {
        self.client
            .get_with_query(&format!("{LEADS}/activities.json"), query)
            .await
    }
}

impl Endpoint for Leads<'_> {
    fn client(&self) -> &MarketoClient {
        self.client
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(LEADS)
    }
}

impl Describe for Leads<'_> {}
impl QueryRecords for Leads<'_> {}
impl SyncRecords for Leads<'_> {}
impl DeleteRecords for Leads<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_activity_query_joins_type_ids() {
        let query = LeadActivityQuery {
            activity_type_ids: Some(vec![1, 12, 13]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"activityTypeIds": "1,12,13"})
        );
    }

    #[test]
    fn test_activity_query_default_is_empty() {
        assert_eq!(
            serde_qs::to_string(&LeadActivityQuery::default()).unwrap(),
            ""
        );
    }

    #[test]
    fn test_changes_query_only_sends_start_date() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let value = serde_json::to_value(LeadChangesQuery::since(start)).unwrap();
        assert_eq!(value, json!({"startDate": "2024-01-01T00:00:00Z"}));
    }
}
