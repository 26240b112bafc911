//! Tests for token acquisition and caching.
//!
//! Uses wiremock to stand in for the Marketo identity endpoint and counts
//! exchanges with `.expect(n)`.

use std::time::Duration;

use chrono::Utc;
use mktoapi::{ClientConfig, Credentials, MarketoClient, MarketoError, DEFAULT_TOKEN_LIFETIME_SECS};
use serde_json::json;
use tokio::task::JoinSet;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/identity/oauth/token";

fn client_for(server: &MockServer, credentials: Credentials) -> MarketoClient {
    let config = ClientConfig::default()
        .with_instance_url(&server.uri())
        .unwrap();
    MarketoClient::with_config(credentials, config).unwrap()
}

fn credentials() -> Credentials {
    Credentials::new("123-ABC-456", "client-id", "client-secret")
}

fn token_body(token: &str, expires_in: u64) -> serde_json::Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": expires_in,
        "scope": "api-user@example.com"
    })
}

#[tokio::test]
async fn test_exchange_sends_client_credentials_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .and(query_param("grant_type", "client_credentials"))
        .and(query_param("client_id", "client-id"))
        .and(query_param("client_secret", "client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1", 3599)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());
    let token = client.access_token().await.unwrap();

    assert_eq!(token.access_token(), "tok-1");
    assert!(!token.is_expired());
}

#[tokio::test]
async fn test_cached_token_is_reused() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1", 3599)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());
    let first = client.access_token().await.unwrap();
    let second = client.access_token().await.unwrap();
    let third = client.token_manager().get_token().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[tokio::test]
async fn test_expired_token_triggers_one_new_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("short-lived", 0)))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("fresh", 3599)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());

    let expired = client.access_token().await.unwrap();
    assert_eq!(expired.access_token(), "short-lived");
    assert!(expired.is_expired());

    let renewed = client.access_token().await.unwrap();
    assert_eq!(renewed.access_token(), "fresh");
    assert!(renewed.expires_at() > expired.expires_at());

    // Still valid: no third exchange.
    assert_eq!(client.access_token().await.unwrap(), renewed);
}

#[tokio::test]
async fn test_invalidate_forces_new_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok", 3599)))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());
    client.access_token().await.unwrap();

    client.token_manager().invalidate().await;
    assert!(client.token_manager().current().await.is_none());

    client.access_token().await.unwrap();
    assert!(client.token_manager().current().await.is_some());
}

#[tokio::test]
async fn test_missing_expires_in_uses_default_lifetime() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());
    let before = Utc::now();
    let token = client.access_token().await.unwrap();
    let lifetime = (token.expires_at() - before).num_seconds();

    assert!(lifetime >= DEFAULT_TOKEN_LIFETIME_SECS);
    assert!(lifetime <= DEFAULT_TOKEN_LIFETIME_SECS + 5);
}

#[tokio::test]
async fn test_empty_secret_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok", 3599)))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Credentials::new("123-ABC-456", "client-id", ""));
    let err = client.access_token().await.unwrap_err();

    assert!(matches!(err, MarketoError::Configuration(_)));
}

#[tokio::test]
async fn test_rejected_credentials_are_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client",
            "error_description": "Bad client credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());
    let err = client.access_token().await.unwrap_err();

    match err {
        MarketoError::Authentication {
            message,
            status_code,
        } => {
            assert_eq!(status_code, Some(401));
            assert!(message.contains("Bad client credentials"));
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
    assert!(client.token_manager().current().await.is_none());
}

#[tokio::test]
async fn test_response_without_access_token_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "unauthorized",
            "error_description": "No client with requested id"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());
    let err = client.access_token().await.unwrap_err();

    assert!(matches!(err, MarketoError::Authentication { .. }));
    assert!(err.to_string().contains("No client with requested id"));
}

#[tokio::test]
async fn test_concurrent_callers_share_one_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("shared", 3599))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());

    let mut tasks = JoinSet::new();
    for _ in 0..16 {
        let client = client.clone();
        tasks.spawn(async move { client.access_token().await });
    }

    let mut tokens = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        tokens.push(joined.unwrap().unwrap());
    }

    assert_eq!(tokens.len(), 16);
    assert!(tokens.iter().all(|t| t == &tokens[0]));
    assert_eq!(tokens[0].access_token(), "shared");
}

#[tokio::test]
async fn test_concurrent_callers_share_one_renewal_after_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("stale", 0)))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("renewed", 3599))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());

    let held = client.access_token().await.unwrap();
    assert!(held.is_expired());
    assert_eq!(client.token_manager().current().await, Some(held));

    let mut tasks = JoinSet::new();
    for _ in 0..16 {
        let client = client.clone();
        tasks.spawn(async move { client.token_manager().get_token().await });
    }

    while let Some(joined) = tasks.join_next().await {
        assert_eq!(joined.unwrap().unwrap().access_token(), "renewed");
    }
}

#[tokio::test]
async fn test_non_json_token_response_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());
    let err = client.access_token().await.unwrap_err();

    match err {
        MarketoError::Authentication {
            message,
            status_code,
        } => {
            assert_eq!(status_code, Some(200));
            assert!(message.contains("malformed token response"));
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
    assert!(client.token_manager().current().await.is_none());
}

#[tokio::test]
async fn test_current_waits_for_in_flight_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("slow", 3599))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, credentials());

    let refreshing = {
        let client = client.clone();
        tokio::spawn(async move { client.access_token().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let seen = client.token_manager().current().await;
    let fetched = refreshing.await.unwrap().unwrap();

    assert_eq!(seen, Some(fetched));
}
