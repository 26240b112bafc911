//! Lead database: program members.

use serde::Serialize;
use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::pagination::OffsetParams;
use crate::params::{IdsBody, InputBody};

const PROGRAMS: &str = "v1/programs";

/// Membership of leads in programs (`/rest/v1/programs/{id}/members`).
#[derive(Debug, Clone, Copy)]
pub struct ProgramMembers<'a> {
    client: &'a MarketoClient,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl<'a> ProgramMembers<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    /// Members of a program.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, program_id: u64, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{PROGRAMS}/{program_id}/members.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, program_id: u64, lead_id: u64) -> Result<Value> {
        self.client
            .get(&format!("{PROGRAMS}/{program_id}/member/{lead_id}.json"))
            .await
    }

    /// Add leads to a program. Each record carries at least a `leadId` and
    /// the initial `status`.
    #[tracing::instrument(skip(self, members))]
    pub async fn add<R: Serialize + Sync>(&self, program_id: u64, members: &[R]) -> Result<Value> {
        self.client
            .post(
                &format!("{PROGRAMS}/{program_id}/members.json"),
                &InputBody::new(members),
            )
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, program_id: u64, lead_ids: &[u64]) -> Result<Value> {
        self.client
            .delete_with_body(
                &format!("{PROGRAMS}/{program_id}/members.json"),
                &IdsBody { id: lead_ids },
            )
            .await
    }

    /// Current program status of one member.
    #[tracing::instrument(skip(self))]
    pub async fn status(&self, program_id: u64, lead_id: u64) -> Result<Value> {
        self.client
            .get(&format!(
                "{PROGRAMS}/{program_id}/member/{lead_id}/status.json"
            ))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        program_id: u64,
        lead_id: u64,
        status: &str,
        reason: Option<&str>,
    ) -> Result<Value> {
        self.client
            .put(
                &format!("{PROGRAMS}/{program_id}/member/{lead_id}/status.json"),
                &StatusBody { status, reason },
            )
            .await
    }
}
