//! Trait definitions for record operations shared across resource families.
//!
//! Each family implements the traits its endpoints support; the request
//! shapes live in the provided methods.

mod delete;
mod describe;
mod endpoint;
mod query;
mod sync;

pub use delete::DeleteRecords;
pub use describe::Describe;
pub use endpoint::Endpoint;
pub use query::QueryRecords;
pub use sync::SyncRecords;
