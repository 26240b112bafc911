//! Marketo REST API client library.
//!
//! An async client for the Marketo REST API. A shared [`TokenManager`]
//! obtains OAuth2 client-credentials tokens on demand and caches them until
//! they expire; resource families (leads, companies, assets, ...) borrow the
//! client and attach the current token to every request.
//!
//! # Quick Start
//!
//! ```no_run
//! use mktoapi::{Describe, FilterQuery, MarketoClient, QueryRecords};
//!
//! #[tokio::main]
//! async fn main() -> mktoapi::Result<()> {
//!     // Create client from environment variables
//!     let client = MarketoClient::from_env()?;
//!
//!     // Field metadata for leads
//!     let description = client.leads().describe().await?;
//!     println!("{description}");
//!
//!     // Leads by email address
//!     let query = FilterQuery::new("email", ["jane@example.com"])
//!         .fields(["id", "email", "firstName", "lastName"]);
//!     let leads = client.leads().query(&query).await?;
//!     println!("{}", leads["result"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Record operations that many objects share are traits with provided
//! methods, implemented by each family whose endpoints support them:
//!
//! - [`Describe`] - Field metadata of an object
//! - [`QueryRecords`] - Records matching a filter
//! - [`SyncRecords`] - Create or update records
//! - [`DeleteRecords`] - Delete records
//!
//! Family-specific calls are inherent methods on the family handle. Every
//! call returns the decoded JSON response as a [`serde_json::Value`].
//!
//! # Configuration
//!
//! [`MarketoClient::from_env`] reads:
//!
//! - `MARKETO_MUNCHKIN_ID` (required) - Instance id, e.g. `123-ABC-456`
//! - `MARKETO_CLIENT_ID` (required) - LaunchPoint service client id
//! - `MARKETO_CLIENT_SECRET` (required) - LaunchPoint service client secret
//! - `MARKETO_INSTANCE_URL` (optional) - Replaces `https://{munchkin}.mktorest.com/`
//! - `MARKETO_TIMEOUT_SECS` (optional) - Per-request timeout, default 60

mod auth;
mod client;
mod config;
mod error;
mod pagination;
mod params;
mod resources;
mod subscriptions;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use auth::{Credentials, Token, TokenManager, DEFAULT_TOKEN_LIFETIME_SECS};
pub use client::MarketoClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::{MarketoError, Result};
pub use pagination::{has_more, next_page_token, OffsetParams, PageTokenParams};
pub use params::{join_comma, DedupeBy, DeleteBy, FilterQuery, SyncAction, SyncOptions};
pub use subscriptions::{Subscription, Subscriptions};

// Re-export traits
pub use traits::{DeleteRecords, Describe, Endpoint, QueryRecords, SyncRecords};

// Re-export resource families
pub use resources::{
    // Lead database
    Companies,
    CustomObject,
    CustomObjects,
    FieldUpdate,
    Fields,
    LeadActivityQuery,
    LeadChangesQuery,
    Leads,
    NamedAccountListUpdate,
    NamedAccounts,
    NewField,
    NewNamedAccountList,
    Opportunities,
    OpportunityRoles,
    ProgramMembers,
    SalesPersons,
    // Activities
    Activities,
    ActivityQuery,
    CustomActivityType,
    // Assets
    Assets,
    NewEmail,
    NewForm,
    NewLandingPage,
    // Users
    UserInvite,
    UserUpdate,
    Users,
};
