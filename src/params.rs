//! Request parameter types shared across resource families.
//!
//! Query strings carry lists as comma-joined values (`ids=1,2,3`); JSON
//! bodies carry them as native arrays. Absent optional values are never
//! sent, and neither is an optional list that is present but empty.

use std::borrow::Cow;
use std::fmt::Display;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{MarketoError, Result};

/// Join values with commas, no trailing separator.
pub fn join_comma<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) mod comma_separated {
    use super::*;

    pub fn serialize<S, T>(values: &[T], serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        serializer.serialize_str(&join_comma(values))
    }
}

pub(crate) mod comma_separated_opt {
    use super::*;

    pub fn serialize<S, T>(values: &Option<Vec<T>>, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        match values {
            Some(values) => serializer.serialize_str(&join_comma(values)),
            None => serializer.serialize_none(),
        }
    }
}

/// Percent-encode a free-form identifier as a single path segment.
///
/// Empty and dot-only names (`.`, `..`) are rejected: joined onto the REST
/// base they would address a different path.
pub(crate) fn path_segment(value: &str) -> Result<Cow<'_, str>> {
    if matches!(value, "" | "." | "..") {
        return Err(MarketoError::Configuration(format!(
            "{value:?} is not a usable path segment"
        )));
    }
    Ok(urlencoding::encode(value))
}

/// Fail with [`MarketoError::Configuration`] when a mandatory list is empty.
pub(crate) fn require_values<T>(name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(MarketoError::Configuration(format!(
            "`{name}` needs at least one value"
        )));
    }
    Ok(())
}

pub(crate) fn is_none_or_empty<T>(values: &Option<Vec<T>>) -> bool {
    values.as_ref().map_or(true, Vec::is_empty)
}

/// What a sync call should do with each input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncAction {
    CreateOnly,
    UpdateOnly,
    CreateOrUpdate,
    CreateDuplicate,
}

/// How the server matches input records to existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DedupeBy {
    /// Match on the object's dedupe fields.
    DedupeFields,
    /// Match on the object's id field.
    IdField,
}

/// How the server identifies records to delete.
pub type DeleteBy = DedupeBy;

/// Options for a sync (create/update) call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Server default is `createOrUpdate`.
    pub action: Option<SyncAction>,
    /// Server default is `dedupeFields`.
    pub dedupe_by: Option<DedupeBy>,
}

impl SyncOptions {
    #[must_use]
    pub fn action(mut self, action: SyncAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn dedupe_by(mut self, dedupe_by: DedupeBy) -> Self {
        self.dedupe_by = Some(dedupe_by);
        self
    }
}

/// Query by filter: the records whose `filter_type` field matches any of
/// `filter_values`.
///
/// # Example
///
/// ```
/// use mktoapi::FilterQuery;
///
/// let query = FilterQuery::new("email", ["jane@example.com", "joe@example.com"])
///     .fields(["id", "email", "firstName"])
///     .batch_size(100);
/// assert_eq!(query.filter_values.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    /// A searchable or dedupe field of the object.
    pub filter_type: String,

    /// Values to match.
    #[serde(serialize_with = "comma_separated::serialize")]
    pub filter_values: Vec<String>,

    /// Fields to return; the server picks a default set when absent.
    #[serde(
        serialize_with = "comma_separated_opt::serialize",
        skip_serializing_if = "is_none_or_empty"
    )]
    pub fields: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl FilterQuery {
    /// Check the mandatory parts before anything is sent.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.filter_type.is_empty() {
            return Err(MarketoError::Configuration(
                "`filterType` must not be empty".to_string(),
            ));
        }
        require_values("filterValues", &self.filter_values)
    }

    pub fn new<I, V>(filter_type: impl Into<String>, filter_values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            filter_type: filter_type.into(),
            filter_values: filter_values.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn fields<I, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    #[must_use]
    pub fn next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }
}

/// `{"input": [...], "lookupField": ...}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InputBody<'a, R> {
    pub input: &'a [R],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_field: Option<&'a str>,
}

impl<'a, R> InputBody<'a, R> {
    pub fn new(input: &'a [R]) -> Self {
        Self {
            input,
            lookup_field: None,
        }
    }

    pub fn lookup_field(mut self, lookup_field: Option<&'a str>) -> Self {
        self.lookup_field = lookup_field;
        self
    }
}

/// `{"id": [...]}`
#[derive(Debug, Serialize)]
pub(crate) struct IdsBody<'a> {
    pub id: &'a [u64],
}
