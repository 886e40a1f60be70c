//! Lead storage seams and the in-memory store backing a dashboard session.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::lead::{Lead, LeadPatch, NewLead};
use crate::domain::types::LeadId;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod query;

pub use memory::InMemoryRepository;
pub use query::{LeadListQuery, filter_leads};

/// Immutable view of the lead collection at one point in time.
pub type LeadSnapshot = Arc<Vec<Lead>>;

pub trait LeadReader {
    /// Full collection, newest first.
    fn list_leads(&self) -> RepositoryResult<LeadSnapshot>;
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
    /// Search-and-stage filtered subsequence of [`LeadReader::list_leads`].
    fn search_leads(&self, query: &LeadListQuery) -> RepositoryResult<Vec<Lead>>;
}

pub trait LeadWriter {
    /// Inserts the lead at the front of the collection.
    fn create_lead(&mut self, new_lead: &NewLead, today: NaiveDate) -> RepositoryResult<Lead>;
    /// Merges `patch` into the matching lead; `Ok(None)` when no lead has `id`.
    fn update_lead(&mut self, id: LeadId, patch: &LeadPatch) -> RepositoryResult<Option<Lead>>;
}
