//! User management.

use serde::Serialize;
use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::pagination::OffsetParams;
use crate::params::is_none_or_empty;

const USERS: &str = "v1/users";

/// Instance users (`/rest/v1/users`).
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a MarketoClient,
}

/// Invitation for a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInvite {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_ids: Vec<u64>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    pub permissions: Option<Vec<String>>,
}

/// Partial update of a user. Unset fields are left as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    pub role_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    pub permissions: Option<Vec<String>>,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{USERS}.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, user_id: u64) -> Result<Value> {
        self.client.get(&format!("{USERS}/{user_id}.json")).await
    }

    #[tracing::instrument(skip(self, invite))]
    pub async fn invite(&self, invite: &UserInvite) -> Result<Value> {
        self.client.post(&format!("{USERS}/invite.json"), invite).await
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update(&self, user_id: u64, update: &UserUpdate) -> Result<Value> {
        self.client
            .put(&format!("{USERS}/{user_id}.json"), update)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, user_id: u64) -> Result<Value> {
        self.client.delete(&format!("{USERS}/{user_id}.json")).await
    }

    /// Roles that can be assigned to users.
    #[tracing::instrument(skip(self))]
    pub async fn roles(&self) -> Result<Value> {
        self.client.get(&format!("{USERS}/roles.json")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invite_without_permissions() {
        let invite = UserInvite {
            email: "jane@example.com".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            role_ids: vec![1, 2],
            permissions: None,
        };
        assert_eq!(
            serde_json::to_value(&invite).unwrap(),
            json!({
                "email": "jane@example.com",
                "firstName": "Jane",
                "lastName": "Doe",
                "roleIds": [1, 2]
            })
        );
    }

    #[test]
    fn test_empty_update_is_empty_object() {
        assert_eq!(serde_json::to_value(UserUpdate::default()).unwrap(), json!({}));
    }
}
