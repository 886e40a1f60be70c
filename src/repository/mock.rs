//! Mock repository implementation for isolating services in tests.

use chrono::NaiveDate;
use mockall::mock;

use crate::domain::lead::{Lead, LeadPatch, NewLead};
use crate::domain::types::LeadId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{LeadListQuery, LeadReader, LeadSnapshot, LeadWriter};

mock! {
    pub Repository {}

    impl LeadReader for Repository {
        fn list_leads(&self) -> RepositoryResult<LeadSnapshot>;
        fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
        fn search_leads(&self, query: &LeadListQuery) -> RepositoryResult<Vec<Lead>>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&mut self, new_lead: &NewLead, today: NaiveDate) -> RepositoryResult<Lead>;
        fn update_lead(
            &mut self,
            id: LeadId,
            patch: &LeadPatch,
        ) -> RepositoryResult<Option<Lead>>;
    }
}
