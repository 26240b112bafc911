//! Lead endpoint handlers.
//!
//! Marketo reports application errors with HTTP 200 and `success: false`;
//! these handlers do the same.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use crate::mock_server::fixtures::Fixtures;
use crate::mock_server::state::MockState;
use crate::{DedupeBy, SyncAction};

/// Query parameters for `GET /rest/v1/leads.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadQuery {
    pub filter_type: Option<String>,
    pub filter_values: Option<String>,
    pub fields: Option<String>,
}

/// Body of `POST /rest/v1/leads.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncLeadsBody {
    pub input: Vec<Value>,
    pub action: Option<SyncAction>,
    pub dedupe_by: Option<DedupeBy>,
}

/// Body of `POST /rest/v1/leads/delete.json`.
#[derive(Debug, Deserialize)]
pub struct DeleteLeadsBody {
    pub input: Vec<Value>,
}

/// GET /rest/v1/leads/describe.json
pub async fn describe_leads(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&mut state, &headers) {
        return rejection;
    }
    success(&mut state, Fixtures::lead_fields())
}

/// GET /rest/v1/leads.json
pub async fn query_leads(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<LeadQuery>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&mut state, &headers) {
        return rejection;
    }

    let (Some(filter_type), Some(filter_values)) = (query.filter_type, query.filter_values)
    else {
        return failure(&mut state, "1003", "filterType and filterValues are required");
    };

    let values: Vec<&str> = filter_values.split(',').collect();
    let fields: Option<Vec<&str>> = query
        .fields
        .as_deref()
        .map(|f| f.split(',').collect());

    let result = state
        .find_leads(&filter_type, &values)
        .into_iter()
        .map(|lead| project(lead, fields.as_deref()))
        .collect();
    success(&mut state, result)
}

/// GET /rest/v1/leads/{id}.json
pub async fn get_lead(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(file): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&mut state, &headers) {
        return rejection;
    }

    let Some(id) = lead_id(&file) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let result = state.get_lead(id).cloned().into_iter().collect();
    success(&mut state, result)
}

/// POST /rest/v1/leads.json
pub async fn sync_leads(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<SyncLeadsBody>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&mut state, &headers) {
        return rejection;
    }

    let action = body.action.unwrap_or(SyncAction::CreateOrUpdate);
    let dedupe_by = body.dedupe_by.unwrap_or(DedupeBy::DedupeFields);
    let result = body
        .input
        .iter()
        .map(|record| state.sync_lead(record, action, dedupe_by).to_json())
        .collect();
    success(&mut state, result)
}

/// POST /rest/v1/leads/delete.json
pub async fn delete_leads(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<DeleteLeadsBody>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&mut state, &headers) {
        return rejection;
    }

    let ids: Vec<u64> = body
        .input
        .iter()
        .filter_map(|record| record.get("id").and_then(Value::as_u64))
        .collect();
    let result = ids
        .into_iter()
        .map(|id| delete_result(&mut state, id))
        .collect();
    success(&mut state, result)
}

/// DELETE /rest/v1/leads/{id}.json
pub async fn delete_lead(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(file): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&mut state, &headers) {
        return rejection;
    }

    let Some(id) = lead_id(&file) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let result = vec![delete_result(&mut state, id)];
    success(&mut state, result)
}

fn delete_result(state: &mut MockState, id: u64) -> Value {
    if state.delete_lead(id) {
        json!({"id": id, "status": "deleted"})
    } else {
        json!({
            "id": id,
            "status": "skipped",
            "reasons": [{"code": "1004", "message": "Lead not found"}]
        })
    }
}

/// Check the bearer token; missing or unknown tokens get Marketo's 601/602.
fn authorize(state: &mut MockState, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if state.is_valid_token(token) => Ok(()),
        Some(_) => Err(failure(state, "601", "Access token invalid")),
        None => Err(failure(state, "600", "Access token missing")),
    }
}

fn success(state: &mut MockState, result: Vec<Value>) -> Response {
    let body = json!({
        "requestId": state.next_request_id(),
        "success": true,
        "result": result
    });
    (StatusCode::OK, Json(body)).into_response()
}

fn failure(state: &mut MockState, code: &str, message: &str) -> Response {
    let body = json!({
        "requestId": state.next_request_id(),
        "success": false,
        "errors": [{"code": code, "message": message}]
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// `"42.json"` -> `42`
fn lead_id(file: &str) -> Option<u64> {
    file.strip_suffix(".json")?.parse().ok()
}

/// Keep `id` plus the requested fields, or the whole lead if none requested.
fn project(lead: &Value, fields: Option<&[&str]>) -> Value {
    let Some(fields) = fields else {
        return lead.clone();
    };
    let mut out = Map::new();
    if let Some(id) = lead.get("id") {
        out.insert("id".to_string(), id.clone());
    }
    for field in fields {
        if let Some(value) = lead.get(*field) {
            out.insert((*field).to_string(), value.clone());
        }
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_id_from_path_segment() {
        assert_eq!(lead_id("42.json"), Some(42));
        assert_eq!(lead_id("42"), None);
        assert_eq!(lead_id("describe.json"), None);
    }

    #[test]
    fn test_project_keeps_id_and_requested_fields() {
        let lead = Fixtures::lead(7, "jane@example.com", "Jane", "Doe");
        let projected = project(&lead, Some(&["email"]));
        assert_eq!(projected, json!({"id": 7, "email": "jane@example.com"}));
        assert_eq!(project(&lead, None), lead);
    }
}
