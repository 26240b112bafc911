//! Mock Marketo API server.
//!
//! Provides an axum-based HTTP server that simulates the identity endpoint
//! and the lead database of a Marketo instance.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;
use crate::{ClientConfig, MarketoClient};

/// A mock Marketo instance for testing.
///
/// The server runs in the background; point a [`MarketoClient`] at it with
/// [`client`](Self::client) or [`client_config`](Self::client_config).
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with the default leads.
    ///
    /// The server listens on a random available port and returns immediately.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with an empty lead database.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{addr}"),
            handle,
            state: shared_state,
        }
    }

    /// Get the instance URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Client settings that route both the token exchange and REST calls
    /// to this server.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_instance_url(&self.url)
            .expect("mock server URL is valid")
    }

    /// A client using the fixture credentials.
    pub fn client(&self) -> MarketoClient {
        MarketoClient::with_config(Fixtures::credentials(), self.client_config())
            .expect("Failed to build client")
    }

    /// Number of token exchanges the server has seen.
    pub async fn token_requests(&self) -> usize {
        self.state.read().await.token_requests
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Fixtures::default_leads()
            .into_iter()
            .fold(MockState::new(), MockState::with_lead)
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Identity
            .route("/identity/oauth/token", get(handlers::issue_token))
            // Leads
            .route(
                "/rest/v1/leads.json",
                get(handlers::query_leads).post(handlers::sync_leads),
            )
            .route("/rest/v1/leads/describe.json", get(handlers::describe_leads))
            .route("/rest/v1/leads/delete.json", post(handlers::delete_leads))
            .route(
                "/rest/v1/leads/:file",
                get(handlers::get_lead).delete(handlers::delete_lead),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
