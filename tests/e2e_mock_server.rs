//! E2E tests using the mock Marketo server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use mktoapi::mock_server::{Fixtures, MockServer, MockState};
use mktoapi::{
    DedupeBy, DeleteRecords, Describe, FilterQuery, MarketoClient, MarketoError, QueryRecords,
    SyncAction, SyncOptions, SyncRecords,
};
use serde_json::json;

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let client = reqwest::Client::new();
    let result = client.get(format!("{url}/health")).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Token Lifecycle
// =============================================================================

#[tokio::test]
async fn test_token_reused_across_requests() {
    let server = MockServer::start().await;
    let client = server.client();

    client.leads().describe().await.unwrap();
    client.leads().get_by_id(1).await.unwrap();
    // No company routes on the mock: 404, but still authorized with the cached token.
    client.companies().describe().await.unwrap_err();

    assert_eq!(server.token_requests().await, 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_zero_lifetime_token_is_renewed_each_call() {
    let state = MockState::new().with_token_lifetime(Some(0));
    let server = MockServer::with_state(state).await;
    let client = server.client();

    client.leads().describe().await.unwrap();
    client.leads().describe().await.unwrap();
    client.leads().describe().await.unwrap();

    assert_eq!(server.token_requests().await, 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_clones_share_token() {
    let server = MockServer::start().await;
    let client = server.client();
    let clone = client.clone();

    let mut tasks = tokio::task::JoinSet::new();
    for c in [client, clone] {
        tasks.spawn(async move { c.leads().describe().await });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().unwrap();
    }

    assert_eq!(server.token_requests().await, 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_revoked_token_is_reported_not_retried() {
    let server = MockServer::start().await;
    let client = server.client();

    client.leads().describe().await.unwrap();
    server.state().write().await.revoke_tokens();

    // Marketo answers 200 with success=false and code 601.
    let response = client.leads().describe().await.unwrap();
    assert_eq!(response["success"], false);
    assert_eq!(response["errors"][0]["code"], "601");
    assert_eq!(server.token_requests().await, 1);

    // The caller decides to drop the token and try again.
    client.token_manager().invalidate().await;
    let response = client.leads().describe().await.unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(server.token_requests().await, 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_secret_fails_authentication() {
    let server = MockServer::start().await;
    let credentials = mktoapi::Credentials::new(
        mktoapi::mock_server::MUNCHKIN_ID,
        mktoapi::mock_server::CLIENT_ID,
        "not-the-secret",
    );
    let client = MarketoClient::with_config(credentials, server.client_config()).unwrap();

    let err = client.leads().describe().await.unwrap_err();

    assert!(matches!(
        err,
        MarketoError::Authentication {
            status_code: Some(401),
            ..
        }
    ));
    assert_eq!(server.token_requests().await, 1);

    server.shutdown().await;
}

// =============================================================================
// Lead Workflows
// =============================================================================

#[tokio::test]
async fn test_query_default_leads_by_email() {
    let server = MockServer::start().await;
    let client = server.client();

    let query = FilterQuery::new("email", ["jane.doe@example.com", "ada.lovelace@example.com"])
        .fields(["firstName"]);
    let response = client.leads().query(&query).await.unwrap();

    let names: Vec<&str> = response["result"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|lead| lead["firstName"].as_str())
        .collect();
    assert_eq!(names, vec!["Jane", "Ada"]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_query_delete_workflow() {
    let server = MockServer::start_empty().await;
    let client = server.client();
    let leads = client.leads();

    // Create
    let records = vec![
        json!({"email": "grace@example.com", "firstName": "Grace"}),
        json!({"email": "alan@example.com", "firstName": "Alan"}),
    ];
    let created = leads
        .sync(&records, &SyncOptions::default().action(SyncAction::CreateOnly))
        .await
        .unwrap();
    assert_eq!(created["result"][0]["status"], "created");
    assert_eq!(created["result"][1]["status"], "created");
    let grace_id = created["result"][0]["id"].as_u64().unwrap();

    // Creating again is skipped
    let again = leads
        .sync(&records[..1], &SyncOptions::default().action(SyncAction::CreateOnly))
        .await
        .unwrap();
    assert_eq!(again["result"][0]["status"], "skipped");

    // Update by id
    let update = vec![json!({"id": grace_id, "lastName": "Hopper"})];
    let updated = leads
        .sync(
            &update,
            &SyncOptions::default()
                .action(SyncAction::UpdateOnly)
                .dedupe_by(DedupeBy::IdField),
        )
        .await
        .unwrap();
    assert_eq!(updated["result"][0]["status"], "updated");

    let fetched = leads.get_by_id(grace_id).await.unwrap();
    assert_eq!(fetched["result"][0]["lastName"], "Hopper");

    // Delete
    let deleted = leads
        .delete(&[json!({"id": grace_id})], None)
        .await
        .unwrap();
    assert_eq!(deleted["result"][0]["status"], "deleted");

    let query = FilterQuery::new("id", [grace_id.to_string()]);
    let remaining = leads.query(&query).await.unwrap();
    assert!(remaining["result"].as_array().unwrap().is_empty());
    assert_eq!(server.state().read().await.leads.len(), 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_single_lead() {
    let state = MockState::new().with_lead(Fixtures::lead(77, "temp@example.com", "Temp", "Lead"));
    let server = MockServer::with_state(state).await;
    let client = server.client();

    let response = client.leads().delete_by_id(77).await.unwrap();
    assert_eq!(response["result"][0]["status"], "deleted");

    let response = client.leads().delete_by_id(77).await.unwrap();
    assert_eq!(response["result"][0]["status"], "skipped");

    server.shutdown().await;
}
