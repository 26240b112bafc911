//! Resource families of the Marketo REST API.
//!
//! Each family is a thin handle borrowing a [`MarketoClient`]; obtain one
//! through the matching accessor (`client.leads()`, `client.assets()`, ...).
//! Handles are cheap and built fresh on every call.

mod activities;
mod assets;
mod companies;
mod custom_objects;
mod fields;
mod leads;
mod named_accounts;
mod opportunities;
mod program_members;
mod sales_persons;
mod users;

pub use activities::{Activities, ActivityQuery, CustomActivityType};
pub use assets::{Assets, NewEmail, NewForm, NewLandingPage};
pub use companies::Companies;
pub use custom_objects::{CustomObject, CustomObjects};
pub use fields::{FieldUpdate, Fields, NewField};
pub use leads::{LeadActivityQuery, LeadChangesQuery, Leads};
pub use named_accounts::{NamedAccountListUpdate, NamedAccounts, NewNamedAccountList};
pub use opportunities::{Opportunities, OpportunityRoles};
pub use program_members::ProgramMembers;
pub use sales_persons::SalesPersons;
pub use users::{UserInvite, UserUpdate, Users};

use crate::client::MarketoClient;

impl MarketoClient {
    pub fn leads(&self) -> Leads<'_> {
        Leads::new(self)
    }

    pub fn companies(&self) -> Companies<'_> {
        Companies::new(self)
    }

    pub fn opportunities(&self) -> Opportunities<'_> {
        Opportunities::new(self)
    }

    pub fn opportunity_roles(&self) -> OpportunityRoles<'_> {
        OpportunityRoles::new(self)
    }

    pub fn sales_persons(&self) -> SalesPersons<'_> {
        SalesPersons::new(self)
    }

    pub fn custom_objects(&self) -> CustomObjects<'_> {
        CustomObjects::new(self)
    }

    pub fn named_accounts(&self) -> NamedAccounts<'_> {
        NamedAccounts::new(self)
    }

    pub fn program_members(&self) -> ProgramMembers<'_> {
        ProgramMembers::new(self)
    }

    pub fn activities(&self) -> Activities<'_> {
        Activities::new(self)
    }

    pub fn assets(&self) -> Assets<'_> {
        Assets::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// Lead field schema.
    pub fn fields(&self) -> Fields<'_> {
        Fields::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::Credentials;
    use crate::traits::Endpoint;
    use crate::MarketoClient;

    #[test]
    fn test_record_endpoints() {
        let client =
            MarketoClient::new(Credentials::new("123-ABC-456", "id", "secret")).unwrap();
        assert_eq!(client.leads().endpoint(), "v1/leads");
        assert_eq!(client.companies().endpoint(), "v1/companies");
        assert_eq!(client.opportunities().endpoint(), "v1/opportunities");
        assert_eq!(client.sales_persons().endpoint(), "v1/salespersons");
    }
}
