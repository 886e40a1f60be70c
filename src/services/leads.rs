//! Lead store workflows: add, patch and stage navigation.

use chrono::NaiveDate;

use crate::domain::lead::{Lead, LeadPatch, NewLead};
use crate::domain::stage::PipelineStage;
use crate::domain::types::LeadId;
use crate::forms::leads::AddLeadForm;
use crate::repository::{LeadListQuery, LeadReader, LeadWriter};
use crate::services::{ServiceError, ServiceResult};

/// Validates the add-lead form and stores the new lead at the front.
///
/// A blank name, company or email declines the add without touching the
/// store: the result is `Ok(None)` rather than an error.
pub fn add_lead<R>(repo: &mut R, form: AddLeadForm, today: NaiveDate) -> ServiceResult<Option<Lead>>
where
    R: LeadWriter + ?Sized,
{
    let new_lead = match NewLead::try_from(form) {
        Ok(new_lead) => new_lead,
        Err(err) if err.is_missing_required() => {
            log::debug!("Declined to add lead: {err}");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let lead = repo.create_lead(&new_lead, today).map_err(|err| {
        log::error!("Failed to add a lead: {err}");
        err
    })?;

    log::info!("Added lead {} ({})", lead.id, lead.company);
    Ok(Some(lead))
}

/// Merges `patch` into the lead with `id`; `Ok(None)` when no lead matches.
pub fn update_lead<R>(repo: &mut R, id: LeadId, patch: &LeadPatch) -> ServiceResult<Option<Lead>>
where
    R: LeadWriter + ?Sized,
{
    let updated = repo.update_lead(id, patch).map_err(|err| {
        log::error!("Failed to update lead {id}: {err}");
        ServiceError::from(err)
    })?;

    match &updated {
        Some(lead) => log::info!("Updated lead {} (stage {})", lead.id, lead.stage),
        None => log::debug!("No lead with id {id} to update"),
    }
    Ok(updated)
}

/// Moves the lead one stage forward; no-op at the end of the walk.
pub fn advance_lead_stage<R>(repo: &mut R, id: LeadId) -> ServiceResult<Option<Lead>>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    step_stage(repo, id, PipelineStage::advance)
}

/// Moves the lead one stage back; no-op at the start of the walk.
pub fn retreat_lead_stage<R>(repo: &mut R, id: LeadId) -> ServiceResult<Option<Lead>>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    step_stage(repo, id, PipelineStage::back)
}

fn step_stage<R, F>(repo: &mut R, id: LeadId, step: F) -> ServiceResult<Option<Lead>>
where
    R: LeadReader + LeadWriter + ?Sized,
    F: Fn(PipelineStage) -> Option<PipelineStage>,
{
    let Some(lead) = repo.get_lead_by_id(id)? else {
        return Ok(None);
    };
    match step(lead.stage) {
        Some(stage) => update_lead(repo, id, &LeadPatch::stage(stage)),
        None => Ok(Some(lead)),
    }
}

/// Returns the leads matching `query`, preserving store order.
pub fn list_leads<R>(repo: &R, query: &LeadListQuery) -> ServiceResult<Vec<Lead>>
where
    R: LeadReader + ?Sized,
{
    repo.search_leads(query).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::seed::sample_leads;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 21).unwrap()
    }

    #[test]
    fn add_prepends_and_defaults_value() {
        let mut repo = InMemoryRepository::new(sample_leads());

        let lead = add_lead(&mut repo, AddLeadForm::new("Ana Li", "Acme", "a@acme.com"), today())
            .unwrap()
            .expect("lead should be added");

        assert_eq!(lead.initials, "AL");
        assert_eq!(lead.value.get(), 0.0);
        assert_eq!(lead.last_contact, today());
        let leads = repo.list_leads().unwrap();
        assert_eq!(leads.len(), 9);
        assert_eq!(leads[0].id, lead.id);
    }

    #[test]
    fn add_with_blank_required_field_is_declined() {
        let mut repo = InMemoryRepository::new(sample_leads());
        let before = repo.list_leads().unwrap();

        for form in [
            AddLeadForm::new("", "Acme", "a@acme.com"),
            AddLeadForm::new("Ana Li", "", "a@acme.com"),
            AddLeadForm::new("Ana Li", "Acme", ""),
        ] {
            assert!(add_lead(&mut repo, form, today()).unwrap().is_none());
        }

        assert_eq!(*repo.list_leads().unwrap(), *before);
    }

    #[test]
    fn add_accepts_whitespace_only_fields() {
        let mut repo = InMemoryRepository::default();

        let lead = add_lead(&mut repo, AddLeadForm::new(" ", "Acme", "a@acme.com"), today())
            .unwrap()
            .unwrap();

        assert_eq!(lead.name.as_str(), " ");
        assert_eq!(lead.initials, "");
        assert_eq!(repo.list_leads().unwrap().len(), 1);
    }

    #[test]
    fn add_with_unknown_stage_is_an_error() {
        let mut repo = InMemoryRepository::default();
        let form = AddLeadForm {
            stage: "Lost".to_string(),
            ..AddLeadForm::new("Ana Li", "Acme", "a@acme.com")
        };

        let result = add_lead(&mut repo, form, today());

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(repo.is_empty());
    }

    #[test]
    fn stage_patch_leaves_other_leads_identical() {
        let mut repo = InMemoryRepository::new(sample_leads());
        let before = repo.list_leads().unwrap();
        let target = before[1].id;

        update_lead(&mut repo, target, &LeadPatch::stage(PipelineStage::ClosedWon)).unwrap();

        let after = repo.list_leads().unwrap();
        for (old, new) in before.iter().zip(after.iter()) {
            if old.id == target {
                assert_eq!(new.stage, PipelineStage::ClosedWon);
                assert_eq!(
                    Lead {
                        stage: old.stage,
                        ..new.clone()
                    },
                    *old
                );
            } else {
                assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn advance_and_retreat_walk_adjacent_stages() {
        let mut repo = InMemoryRepository::new(sample_leads());
        let id = LeadId::new(4).unwrap(); // New

        let lead = advance_lead_stage(&mut repo, id).unwrap().unwrap();
        assert_eq!(lead.stage, PipelineStage::Qualified);

        let lead = retreat_lead_stage(&mut repo, id).unwrap().unwrap();
        assert_eq!(lead.stage, PipelineStage::New);

        let lead = retreat_lead_stage(&mut repo, id).unwrap().unwrap();
        assert_eq!(lead.stage, PipelineStage::New);
    }

    #[test]
    fn closed_won_does_not_advance() {
        let mut repo = InMemoryRepository::new(sample_leads());
        let id = LeadId::new(6).unwrap(); // Closed Won

        let lead = advance_lead_stage(&mut repo, id).unwrap().unwrap();

        assert_eq!(lead.stage, PipelineStage::ClosedWon);
    }

    #[test]
    fn stage_navigation_on_unknown_lead_is_a_no_op() {
        let mut repo = InMemoryRepository::new(sample_leads());

        let result = advance_lead_stage(&mut repo, LeadId::new(99).unwrap()).unwrap();

        assert!(result.is_none());
    }
}
