use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::stage::PipelineStage;
use crate::domain::types::{CompanyName, DealValue, LeadEmail, LeadId, LeadName};

/// Owner labels a lead can be assigned to.
pub const ASSIGNABLE_OWNERS: [&str; 3] = ["Alex M.", "Jamie L.", "Sam K."];

/// A sales contact tracked through the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub name: LeadName,
    pub company: CompanyName,
    pub email: LeadEmail,
    pub phone: String,
    pub value: DealValue,
    pub stage: PipelineStage,
    pub source: String,
    pub assigned: String,
    pub last_contact: NaiveDate,
    pub tags: Vec<String>,
    /// Avatar initials derived from `name`.
    pub initials: String,
}

impl Lead {
    /// Materializes a new lead from the add payload.
    #[must_use]
    pub fn from_new(id: LeadId, new_lead: NewLead, last_contact: NaiveDate) -> Self {
        let initials = new_lead.name.initials();
        Self {
            id,
            name: new_lead.name,
            company: new_lead.company,
            email: new_lead.email,
            phone: new_lead.phone,
            value: new_lead.value,
            stage: new_lead.stage,
            source: new_lead.source,
            assigned: new_lead.assigned,
            last_contact,
            tags: new_lead.tags,
            initials,
        }
    }

    /// Returns a copy with the patch merged in; untouched fields are kept.
    #[must_use]
    pub fn patched(&self, patch: &LeadPatch) -> Self {
        let mut lead = self.clone();
        if let Some(name) = &patch.name {
            lead.initials = name.initials();
            lead.name = name.clone();
        }
        if let Some(company) = &patch.company {
            lead.company = company.clone();
        }
        if let Some(email) = &patch.email {
            lead.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            lead.phone = phone.clone();
        }
        if let Some(value) = patch.value {
            lead.value = value;
        }
        if let Some(stage) = patch.stage {
            lead.stage = stage;
        }
        if let Some(source) = &patch.source {
            lead.source = source.clone();
        }
        if let Some(assigned) = &patch.assigned {
            lead.assigned = assigned.clone();
        }
        if let Some(last_contact) = patch.last_contact {
            lead.last_contact = last_contact;
        }
        if let Some(tags) = &patch.tags {
            lead.tags = dedup_tags(tags.iter().cloned());
        }
        lead
    }
}

/// Every field of a lead except the store-assigned identifier, initials and
/// last-contact date.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewLead {
    pub name: LeadName,
    pub company: CompanyName,
    pub email: LeadEmail,
    pub phone: String,
    pub value: DealValue,
    pub stage: PipelineStage,
    pub source: String,
    pub assigned: String,
    pub tags: Vec<String>,
}

impl NewLead {
    #[must_use]
    pub fn new(name: LeadName, company: CompanyName, email: LeadEmail) -> Self {
        Self {
            name,
            company,
            email,
            phone: String::new(),
            value: DealValue::ZERO,
            stage: PipelineStage::New,
            source: "Website".to_string(),
            assigned: ASSIGNABLE_OWNERS[0].to_string(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn value(mut self, value: DealValue) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn stage(mut self, stage: PipelineStage) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn assigned(mut self, assigned: impl Into<String>) -> Self {
        self.assigned = assigned.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = dedup_tags(tags.into_iter().map(Into::into));
        self
    }
}

/// Partial field set merged into an existing lead.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct LeadPatch {
    pub name: Option<LeadName>,
    pub company: Option<CompanyName>,
    pub email: Option<LeadEmail>,
    pub phone: Option<String>,
    pub value: Option<DealValue>,
    pub stage: Option<PipelineStage>,
    pub source: Option<String>,
    pub assigned: Option<String>,
    pub last_contact: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
}

impl LeadPatch {
    /// Patch touching only the pipeline stage.
    #[must_use]
    pub fn stage(stage: PipelineStage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }
}

/// Trims tags, drops blanks and repeated labels while keeping first-seen order.
fn dedup_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut result: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !result.iter().any(|seen| seen == tag) {
            result.push(tag.to_string());
        }
    }
    result
}
