use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::lead::{Lead, LeadPatch, NewLead};
use crate::domain::types::LeadId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{LeadListQuery, LeadReader, LeadSnapshot, LeadWriter};

/// Session-scoped lead store.
///
/// Every mutation builds a fresh collection and swaps it in, so snapshots
/// handed out by [`LeadReader::list_leads`] never observe a partial update.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    leads: LeadSnapshot,
    last_id: i64,
}

impl InMemoryRepository {
    pub fn new(leads: Vec<Lead>) -> Self {
        let last_id = leads.iter().map(|lead| lead.id.get()).max().unwrap_or(0);
        Self {
            leads: Arc::new(leads),
            last_id,
        }
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    fn next_id(&mut self) -> RepositoryResult<LeadId> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or(RepositoryError::IdExhausted)?;
        let id = LeadId::new(next)?;
        self.last_id = next;
        Ok(id)
    }
}

impl LeadReader for InMemoryRepository {
    fn list_leads(&self) -> RepositoryResult<LeadSnapshot> {
        Ok(Arc::clone(&self.leads))
    }

    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>> {
        Ok(self.leads.iter().find(|lead| lead.id == id).cloned())
    }

    fn search_leads(&self, query: &LeadListQuery) -> RepositoryResult<Vec<Lead>> {
        Ok(query.apply(&self.leads))
    }
}

impl LeadWriter for InMemoryRepository {
    fn create_lead(&mut self, new_lead: &NewLead, today: NaiveDate) -> RepositoryResult<Lead> {
        let id = self.next_id()?;
        let lead = Lead::from_new(id, new_lead.clone(), today);

        let mut leads = Vec::with_capacity(self.leads.len() + 1);
        leads.push(lead.clone());
        leads.extend(self.leads.iter().cloned());
        self.leads = Arc::new(leads);

        Ok(lead)
    }

    fn update_lead(&mut self, id: LeadId, patch: &LeadPatch) -> RepositoryResult<Option<Lead>> {
        let Some(position) = self.leads.iter().position(|lead| lead.id == id) else {
            return Ok(None);
        };

        let updated = self.leads[position].patched(patch);
        let mut leads = self.leads.as_ref().clone();
        leads[position] = updated.clone();
        self.leads = Arc::new(leads);

        Ok(Some(updated))
    }
}
