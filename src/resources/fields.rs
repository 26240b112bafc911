//! Lead database: lead field schema.

use serde::Serialize;
use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::pagination::OffsetParams;
use crate::params::path_segment;

const LEADS: &str = "v1/leads";
const FIELD_TYPES: &str = "v1/leads/fieldtypes";

/// Lead field definitions.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    client: &'a MarketoClient,
}

/// A lead field to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewField {
    pub name: String,
    pub display_name: String,
    pub data_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_required: bool,
    pub is_hidden: bool,
    pub is_primary_key: bool,
}

impl NewField {
    /// A visible, optional, non-key field.
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            data_type: data_type.into(),
            length: None,
            description: None,
            is_required: false,
            is_hidden: false,
            is_primary_key: false,
        }
    }
}

/// Partial update of a lead field. Unset fields are left as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{LEADS}/fields.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, field_name: &str) -> Result<Value> {
        self.client.get(&field_path(field_name)?).await
    }

    #[tracing::instrument(skip(self, field), fields(name = %field.name))]
    pub async fn create(&self, field: &NewField) -> Result<Value> {
        self.client.post(&format!("{LEADS}/fields.json"), field).await
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update(&self, field_name: &str, update: &FieldUpdate) -> Result<Value> {
        self.client.put(&field_path(field_name)?, update).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, field_name: &str) -> Result<Value> {
        self.client.delete(&field_path(field_name)?).await
    }

    /// Data types a lead field may have.
    #[tracing::instrument(skip(self))]
    pub async fn types(&self) -> Result<Value> {
        self.client.get(&format!("{FIELD_TYPES}.json")).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn type_by_name(&self, type_name: &str) -> Result<Value> {
        self.client
            .get(&format!("{FIELD_TYPES}/{}.json", path_segment(type_name)?))
            .await
    }
}

fn field_path(field_name: &str) -> Result<String> {
    Ok(format!("{LEADS}/field/{}.json", path_segment(field_name)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_path_encodes_name() {
        assert_eq!(field_path("score").unwrap(), "v1/leads/field/score.json");
        assert_eq!(
            field_path("my field").unwrap(),
            "v1/leads/field/my%20field.json"
        );
        assert!(field_path("").is_err());
    }

    #[test]
    fn test_new_field_sends_flags_and_omits_absent_length() {
        let field = NewField::new("webinarScore_c", "Webinar Score", "integer");
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({
                "name": "webinarScore_c",
                "displayName": "Webinar Score",
                "dataType": "integer",
                "isRequired": false,
                "isHidden": false,
                "isPrimaryKey": false
            })
        );
    }

    #[test]
    fn test_field_update_only_sends_set_values() {
        let update = FieldUpdate {
            is_hidden: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"isHidden": true})
        );
    }
}
