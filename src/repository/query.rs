use crate::domain::lead::Lead;
use crate::domain::stage::StageFilter;

/// Free-text search plus stage selector applied to the lead list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadListQuery {
    pub search: Option<String>,
    pub stage: StageFilter,
}

impl LeadListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn stage(mut self, stage: impl Into<StageFilter>) -> Self {
        self.stage = stage.into();
        self
    }

    /// Case-insensitive substring match on name, company or email, ANDed
    /// with the stage filter. An empty search term matches everything.
    pub fn matches(&self, lead: &Lead) -> bool {
        let text_match = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                [lead.name.as_str(), lead.company.as_str(), lead.email.as_str()]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        };
        text_match && self.stage.matches(lead.stage)
    }

    pub fn apply(&self, leads: &[Lead]) -> Vec<Lead> {
        leads
            .iter()
            .filter(|lead| self.matches(lead))
            .cloned()
            .collect()
    }
}

/// Order-preserving filter of `leads` by search text and stage.
pub fn filter_leads(leads: &[Lead], search: &str, stage: StageFilter) -> Vec<Lead> {
    LeadListQuery::new().search(search).stage(stage).apply(leads)
}
