//! Lead database: custom objects.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::pagination::OffsetParams;
use crate::params::{path_segment, InputBody};
use crate::traits::{DeleteRecords, Describe, Endpoint, QueryRecords, SyncRecords};

const CUSTOM_OBJECTS: &str = "v1/customobjects";

/// Custom object types and their schema (`/rest/v1/customobjects`).
///
/// Record operations for one type go through [`object`](Self::object).
#[derive(Debug, Clone, Copy)]
pub struct CustomObjects<'a> {
    client: &'a MarketoClient,
}

/// Records of a single custom object type, addressed by its API name.
#[derive(Debug, Clone)]
pub struct CustomObject<'a> {
    client: &'a MarketoClient,
    api_name: String,
}

impl<'a> CustomObjects<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    /// Custom object types available in the instance.
    #[tracing::instrument(skip(self))]
    pub async fn list_types(&self) -> Result<Value> {
        self.client.get(&format!("{CUSTOM_OBJECTS}.json")).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn field_data_types(&self) -> Result<Value> {
        self.client
            .get(&format!("{CUSTOM_OBJECTS}/schema/fieldDataTypes.json"))
            .await
    }

    /// Objects a custom object can be linked to.
    #[tracing::instrument(skip(self))]
    pub async fn linkable_objects(&self) -> Result<Value> {
        self.client
            .get(&format!("{CUSTOM_OBJECTS}/schema/linkableObjects.json"))
            .await
    }

    /// Assets that depend on a custom object type.
    #[tracing::instrument(skip(self))]
    pub async fn dependent_assets(&self, api_name: &str) -> Result<Value> {
        let path = format!(
            "{CUSTOM_OBJECTS}/schema/{}/dependentAssets.json",
            path_segment(api_name)?
        );
        self.client.get(&path).await
    }

    /// Handle for the records of one custom object type.
    ///
    /// # Errors
    ///
    /// [`MarketoError::Configuration`](crate::MarketoError::Configuration) if
    /// `api_name` is empty, `.` or `..`.
    pub fn object(&self, api_name: impl Into<String>) -> Result<CustomObject<'a>> {
        let api_name = api_name.into();
        path_segment(&api_name)?;
        Ok(CustomObject {
            client: self.client,
            api_name,
        })
    }
}

impl CustomObject<'_> {
    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    /// Page through records of this type by offset.
    #[tracing::instrument(skip(self), fields(api_name = %self.api_name))]
    pub async fn list(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{}.json", self.endpoint()), paging)
            .await
    }

    #[tracing::instrument(skip(self), fields(api_name = %self.api_name))]
    pub async fn get_by_id(&self, object_id: u64) -> Result<Value> {
        self.client
            .get(&format!("{}/{object_id}.json", self.endpoint()))
            .await
    }

    /// Create or update records matched on `lookup_field`.
    #[tracing::instrument(skip(self, records), fields(api_name = %self.api_name))]
    pub async fn upsert<R: Serialize + Sync>(
        &self,
        records: &[R],
        lookup_field: Option<&str>,
    ) -> Result<Value> {
        let body = InputBody::new(records).lookup_field(lookup_field);
        self.client
            .post(&format!("{}/upsert.json", self.endpoint()), &body)
            .await
    }

    #[tracing::instrument(skip(self), fields(api_name = %self.api_name))]
    pub async fn delete_by_id(&self, object_id: u64) -> Result<Value> {
        self.client
            .delete(&format!("{}/{object_id}.json", self.endpoint()))
            .await
    }
}

impl Endpoint for CustomObject<'_> {
    fn client(&self) -> &MarketoClient {
        self.client
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Owned(format!(
            "{CUSTOM_OBJECTS}/{}",
            urlencoding::encode(&self.api_name)
        ))
    }
}

impl Describe for CustomObject<'_> {}
impl QueryRecords for CustomObject<'_> {}
impl SyncRecords for CustomObject<'_> {}
impl DeleteRecords for CustomObject<'_> {}
