//! Mock Marketo server for E2E testing.
//!
//! An in-memory server that simulates the identity endpoint and the lead
//! database. Unlike wiremock, which mocks at the HTTP level per test, this
//! server keeps state across requests, so whole workflows (token reuse,
//! create then query then delete) can be exercised.
//!
//! # Example
//!
//! ```ignore
//! use mktoapi::mock_server::MockServer;
//! use mktoapi::{FilterQuery, QueryRecords};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = server.client();
//!
//!     // Server comes with default leads
//!     let query = FilterQuery::new("email", ["jane.doe@example.com"]);
//!     let leads = client.leads().query(&query).await.unwrap();
//!     assert_eq!(leads["result"][0]["firstName"], "Jane");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{Fixtures, CLIENT_ID, CLIENT_SECRET, MUNCHKIN_ID};
pub use server::MockServer;
pub use state::{MockState, SyncOutcome};
