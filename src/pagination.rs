//! Paging parameters for Marketo list endpoints.
//!
//! Marketo pages in two ways: older endpoints take an offset and a maximum
//! count, newer ones take a batch size and an opaque paging token returned by
//! the previous call. Neither is followed automatically; callers pass the
//! token or offset back themselves.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Offset-based paging (`maxReturn`, `offset`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetParams {
    /// Maximum number of records to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_return: Option<u32>,
    /// Number of records to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl OffsetParams {
    /// Create offset params for a specific window.
    #[must_use]
    pub fn window(offset: u32, max_return: u32) -> Self {
        Self {
            max_return: Some(max_return),
            offset: Some(offset),
        }
    }
}

/// Token-based paging (`batchSize`, `nextPageToken`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTokenParams {
    /// Number of records to return per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    /// Token from a previous response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl PageTokenParams {
    /// Continue a listing from the given paging token.
    #[must_use]
    pub fn after(token: impl Into<String>) -> Self {
        Self {
            batch_size: None,
            next_page_token: Some(token.into()),
        }
    }
}

/// The `nextPageToken` of a response, if the listing can be continued.
pub fn next_page_token(response: &Value) -> Option<&str> {
    response
        .get("nextPageToken")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
}

/// Whether a response says more results are available.
pub fn has_more(response: &Value) -> bool {
    response
        .get("moreResult")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
