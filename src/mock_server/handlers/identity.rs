//! Identity endpoint handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// Query parameters of a client-credentials token request.
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub grant_type: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// GET /identity/oauth/token
pub async fn issue_token(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<TokenQuery>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    if query.grant_type.as_deref() != Some("client_credentials") {
        state.token_requests += 1;
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "unsupported_grant_type",
                "error_description": "Unsupported grant type"
            })),
        )
            .into_response();
    }

    let client_id = query.client_id.unwrap_or_default();
    let client_secret = query.client_secret.unwrap_or_default();

    match state.exchange(&client_id, &client_secret) {
        Some(token) => {
            let mut body = json!({
                "access_token": token,
                "token_type": "bearer",
                "scope": "mock-api-user@example.com"
            });
            if let Some(secs) = state.token_lifetime_secs {
                body["expires_in"] = json!(secs);
            }
            (StatusCode::OK, Json(body)).into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_client",
                "error_description": "Bad client credentials"
            })),
        )
            .into_response(),
    }
}
