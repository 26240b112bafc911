//! Mock server state management.
//!
//! In-memory identity service and lead database for the mock Marketo API.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::fixtures::{CLIENT_ID, CLIENT_SECRET};
use crate::{DedupeBy, SyncAction};

/// Shared state for the mock server.
///
/// Wrapped in `Arc<RwLock<_>>` for concurrent access from handlers and the
/// test body.
#[derive(Debug)]
pub struct MockState {
    /// Client id the identity endpoint accepts.
    pub client_id: String,

    /// Client secret the identity endpoint accepts.
    pub client_secret: String,

    /// `expires_in` reported for issued tokens. `None` omits the field.
    pub token_lifetime_secs: Option<u64>,

    /// Number of requests received by the identity endpoint.
    pub token_requests: usize,

    /// Leads indexed by id.
    pub leads: BTreeMap<u64, Value>,

    issued_tokens: HashSet<String>,
    next_lead_id: u64,
    next_request_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            client_id: CLIENT_ID.to_string(),
            client_secret: CLIENT_SECRET.to_string(),
            token_lifetime_secs: Some(3599),
            token_requests: 0,
            leads: BTreeMap::new(),
            issued_tokens: HashSet::new(),
            next_lead_id: 1,
            next_request_id: 1,
        }
    }
}

/// Outcome of syncing one input record.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Created(u64),
    Updated(u64),
    Skipped { code: &'static str, message: &'static str },
}

impl SyncOutcome {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Created(id) => json!({"id": id, "status": "created"}),
            Self::Updated(id) => json!({"id": id, "status": "updated"}),
            Self::Skipped { code, message } => json!({
                "status": "skipped",
                "reasons": [{"code": code, "message": message}]
            }),
        }
    }
}

impl MockState {
    /// Create a new empty state accepting the fixture credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Accept a different client id/secret pair.
    pub fn with_credentials(mut self, client_id: &str, client_secret: &str) -> Self {
        self.client_id = client_id.to_string();
        self.client_secret = client_secret.to_string();
        self
    }

    /// Set the lifetime reported for issued tokens.
    pub fn with_token_lifetime(mut self, secs: Option<u64>) -> Self {
        self.token_lifetime_secs = secs;
        self
    }

    /// Add a lead. Its `id` must be set.
    pub fn with_lead(mut self, lead: Value) -> Self {
        self.insert_lead(lead);
        self
    }

    pub fn insert_lead(&mut self, lead: Value) {
        if let Some(id) = lead.get("id").and_then(Value::as_u64) {
            self.next_lead_id = self.next_lead_id.max(id + 1);
            self.leads.insert(id, lead);
        }
    }

    /// Count an identity request and, if the credentials match, issue a
    /// fresh token.
    pub fn exchange(&mut self, client_id: &str, client_secret: &str) -> Option<String> {
        self.token_requests += 1;
        if client_id != self.client_id || client_secret != self.client_secret {
            return None;
        }
        let token = format!("mock-token-{}", self.token_requests);
        self.issued_tokens.insert(token.clone());
        Some(token)
    }

    pub fn is_valid_token(&self, token: &str) -> bool {
        self.issued_tokens.contains(token)
    }

    /// Invalidate every issued token.
    pub fn revoke_tokens(&mut self) {
        self.issued_tokens.clear();
    }

    pub fn next_request_id(&mut self) -> String {
        let id = self.next_request_id;
        self.next_request_id += 1;
        format!("{id:x}#mock")
    }

    pub fn get_lead(&self, id: u64) -> Option<&Value> {
        self.leads.get(&id)
    }

    /// Leads whose `filter_type` field equals one of `values`.
    pub fn find_leads(&self, filter_type: &str, values: &[&str]) -> Vec<&Value> {
        self.leads
            .values()
            .filter(|lead| {
                lead.get(filter_type)
                    .map(|field| values.iter().any(|v| field_matches(field, v)))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Create or update a lead, matching on `id` or `email`.
    pub fn sync_lead(
        &mut self,
        record: &Value,
        action: SyncAction,
        dedupe_by: DedupeBy,
    ) -> SyncOutcome {
        let existing = match dedupe_by {
            DedupeBy::IdField => record.get("id").and_then(Value::as_u64),
            DedupeBy::DedupeFields => record
                .get("email")
                .and_then(Value::as_str)
                .and_then(|email| {
                    self.find_leads("email", &[email])
                        .first()
                        .and_then(|lead| lead.get("id").and_then(Value::as_u64))
                }),
        }
        .filter(|id| self.leads.contains_key(id));

        match (existing, action) {
            (Some(_), SyncAction::CreateOnly) => SyncOutcome::Skipped {
                code: "1005",
                message: "Lead already exists",
            },
            (None, SyncAction::UpdateOnly) => SyncOutcome::Skipped {
                code: "1004",
                message: "Lead not found",
            },
            (Some(id), SyncAction::CreateOrUpdate | SyncAction::UpdateOnly) => {
                if let (Some(lead), Some(fields)) = (self.leads.get_mut(&id), record.as_object())
                {
                    for (key, value) in fields {
                        if key != "id" {
                            lead[key] = value.clone();
                        }
                    }
                }
                SyncOutcome::Updated(id)
            }
            _ => {
                let id = self.next_lead_id;
                let mut lead = record.clone();
                lead["id"] = json!(id);
                self.insert_lead(lead);
                SyncOutcome::Created(id)
            }
        }
    }

    pub fn delete_lead(&mut self, id: u64) -> bool {
        self.leads.remove(&id).is_some()
    }
}

fn field_matches(field: &Value, wanted: &str) -> bool {
    match field {
        Value::String(s) => s.eq_ignore_ascii_case(wanted),
        Value::Number(n) => n.to_string() == wanted,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_exchange_counts_every_request() {
        let mut state = MockState::new();
        assert!(state.exchange("wrong", "creds").is_none());
        let token = state.exchange(CLIENT_ID, CLIENT_SECRET).unwrap();
        assert_eq!(state.token_requests, 2);
        assert!(state.is_valid_token(&token));

        state.revoke_tokens();
        assert!(!state.is_valid_token(&token));
    }

    #[test]
    fn test_find_leads_by_email_and_id() {
        let state = MockState::new()
            .with_lead(Fixtures::lead(1, "jane@example.com", "Jane", "Doe"))
            .with_lead(Fixtures::lead(2, "joe@example.com", "Joe", "Bloggs"));

        assert_eq!(state.find_leads("email", &["JANE@example.com"]).len(), 1);
        assert_eq!(state.find_leads("id", &["1", "2", "3"]).len(), 2);
        assert!(state.find_leads("company", &["Acme"]).is_empty());
    }

    #[test]
    fn test_sync_creates_then_updates() {
        let mut state = MockState::new().with_lead(Fixtures::lead(5, "a@example.com", "A", "A"));

        let created = state.sync_lead(
            &json!({"email": "new@example.com"}),
            SyncAction::CreateOrUpdate,
            DedupeBy::DedupeFields,
        );
        assert_eq!(created, SyncOutcome::Created(6));

        let updated = state.sync_lead(
            &json!({"email": "a@example.com", "firstName": "Ada"}),
            SyncAction::CreateOrUpdate,
            DedupeBy::DedupeFields,
        );
        assert_eq!(updated, SyncOutcome::Updated(5));
        assert_eq!(state.get_lead(5).unwrap()["firstName"], "Ada");
    }

    #[test]
    fn test_sync_respects_action() {
        let mut state = MockState::new().with_lead(Fixtures::lead(1, "a@example.com", "A", "A"));

        let skipped = state.sync_lead(
            &json!({"email": "a@example.com"}),
            SyncAction::CreateOnly,
            DedupeBy::DedupeFields,
        );
        assert!(matches!(skipped, SyncOutcome::Skipped { code: "1005", .. }));

        let skipped = state.sync_lead(
            &json!({"id": 99}),
            SyncAction::UpdateOnly,
            DedupeBy::IdField,
        );
        assert!(matches!(skipped, SyncOutcome::Skipped { code: "1004", .. }));
    }
}
