//! Base trait for resources rooted at a fixed REST path.

use std::borrow::Cow;

use crate::client::MarketoClient;

/// A resource family whose record operations share one REST path.
///
/// The operation traits ([`Describe`](super::Describe),
/// [`QueryRecords`](super::QueryRecords), [`SyncRecords`](super::SyncRecords),
/// [`DeleteRecords`](super::DeleteRecords)) build their requests from
/// [`endpoint`](Self::endpoint), so implementing them is usually an empty
/// `impl` block.
pub trait Endpoint: Sync {
    /// The client requests are sent through.
    fn client(&self) -> &MarketoClient;

    /// Path relative to the REST base, without extension (e.g. `v1/leads`).
    fn endpoint(&self) -> Cow<'_, str>;
}
