//! Test data fixtures for the mock server.
//!
//! Provides factory functions for credentials and realistic lead records.

use serde_json::{json, Value};

use crate::Credentials;

/// Munchkin id used by the fixture credentials.
pub const MUNCHKIN_ID: &str = "123-ABC-456";

/// Client id accepted by a default [`MockState`](super::MockState).
pub const CLIENT_ID: &str = "mock-client-id";

/// Client secret accepted by a default [`MockState`](super::MockState).
pub const CLIENT_SECRET: &str = "mock-client-secret";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Credentials the mock identity endpoint accepts by default.
    pub fn credentials() -> Credentials {
        Credentials::new(MUNCHKIN_ID, CLIENT_ID, CLIENT_SECRET)
    }

    /// A lead with the standard name and email fields.
    pub fn lead(id: u64, email: &str, first_name: &str, last_name: &str) -> Value {
        json!({
            "id": id,
            "email": email,
            "firstName": first_name,
            "lastName": last_name,
            "updatedAt": "2024-01-15T10:30:00Z",
            "createdAt": "2024-01-01T09:00:00Z"
        })
    }

    /// Leads loaded by [`MockServer::start`](super::MockServer::start).
    pub fn default_leads() -> Vec<Value> {
        vec![
            Self::lead(1, "jane.doe@example.com", "Jane", "Doe"),
            Self::lead(2, "joe.bloggs@example.com", "Joe", "Bloggs"),
            Self::lead(3, "ada.lovelace@example.com", "Ada", "Lovelace"),
        ]
    }

    /// Result list of `GET /rest/v1/leads/describe.json`.
    pub fn lead_fields() -> Vec<Value> {
        [
            (2, "Id", "integer", "id", true),
            (51, "Email Address", "email", "email", false),
            (48, "First Name", "string", "firstName", false),
            (50, "Last Name", "string", "lastName", false),
        ]
        .into_iter()
        .map(|(id, display_name, data_type, name, read_only)| {
            json!({
                "id": id,
                "displayName": display_name,
                "dataType": data_type,
                "rest": {"name": name, "readOnly": read_only}
            })
        })
        .collect()
    }
}
