//! Asset API: emails, landing pages and forms.

use serde::Serialize;
use serde_json::Value;

use crate::client::MarketoClient;
use crate::error::Result;
use crate::pagination::OffsetParams;

const ASSETS: &str = "asset/v1";

/// Marketing assets (`/rest/asset/v1`).
#[derive(Debug, Clone, Copy)]
pub struct Assets<'a> {
    client: &'a MarketoClient,
}

/// A new email asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmail {
    pub name: String,
    pub subject: String,
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub content: String,
}

/// A new landing page asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLandingPage {
    pub name: String,
    pub content: String,
}

/// A new form asset with its field definitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewForm {
    pub name: String,
    pub fields: Vec<Value>,
}

impl<'a> Assets<'a> {
    pub(crate) fn new(client: &'a MarketoClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self))]
    pub async fn emails(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{ASSETS}/emails.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn email(&self, email_id: u64) -> Result<Value> {
        self.client
            .get(&format!("{ASSETS}/email/{email_id}.json"))
            .await
    }

    #[tracing::instrument(skip(self, email), fields(name = %email.name))]
    pub async fn create_email(&self, email: &NewEmail) -> Result<Value> {
        self.client.post(&format!("{ASSETS}/email.json"), email).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn landing_pages(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{ASSETS}/landingPages.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn landing_page(&self, page_id: u64) -> Result<Value> {
        self.client
            .get(&format!("{ASSETS}/landingPage/{page_id}.json"))
            .await
    }

    #[tracing::instrument(skip(self, page), fields(name = %page.name))]
    pub async fn create_landing_page(&self, page: &NewLandingPage) -> Result<Value> {
        self.client
            .post(&format!("{ASSETS}/landingPage.json"), page)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn forms(&self, paging: &OffsetParams) -> Result<Value> {
        self.client
            .get_with_query(&format!("{ASSETS}/forms.json"), paging)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn form(&self, form_id: u64) -> Result<Value> {
        self.client
            .get(&format!("{ASSETS}/form/{form_id}.json"))
            .await
    }

    #[tracing::instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_form(&self, form: &NewForm) -> Result<Value> {
        self.client.post(&format!("{ASSETS}/form.json"), form).await
    }
}
