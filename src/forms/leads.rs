//! Forms for adding and editing leads.

use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::{ASSIGNABLE_OWNERS, LeadPatch, NewLead};
use crate::domain::stage::PipelineStage;
use crate::domain::types::{CompanyName, DealValue, LeadEmail, LeadName};
use crate::forms::FormError;

fn default_stage() -> String {
    PipelineStage::New.as_str().to_string()
}

fn default_source() -> String {
    "Website".to_string()
}

fn default_assigned() -> String {
    ASSIGNABLE_OWNERS[0].to_string()
}

#[derive(Clone, Debug, Deserialize, Validate, PartialEq)]
/// Raw values captured by the add-lead dialog.
pub struct AddLeadForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Free text; anything that does not parse as an amount becomes zero.
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_stage")]
    pub stage: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_assigned")]
    pub assigned: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl AddLeadForm {
    /// Form with the dialog defaults and the three required fields filled.
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            email: email.into(),
            phone: String::new(),
            value: String::new(),
            stage: default_stage(),
            source: default_source(),
            assigned: default_assigned(),
            tags: Vec::new(),
        }
    }
}

impl TryFrom<AddLeadForm> for NewLead {
    type Error = FormError;

    fn try_from(form: AddLeadForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = LeadName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let company = CompanyName::new(form.company).map_err(|_| FormError::InvalidCompany)?;
        let email = LeadEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        let stage = form
            .stage
            .parse::<PipelineStage>()
            .map_err(|_| FormError::InvalidStage(form.stage.clone()))?;

        Ok(NewLead::new(name, company, email)
            .phone(form.phone)
            .value(DealValue::parse_or_zero(&form.value))
            .stage(stage)
            .source(form.source)
            .assigned(form.assigned)
            .tags(form.tags))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
/// Stage selection from the lead detail dialog.
pub struct MoveStageForm {
    pub stage: String,
}

impl TryFrom<MoveStageForm> for LeadPatch {
    type Error = FormError;

    fn try_from(form: MoveStageForm) -> Result<Self, Self::Error> {
        let stage = form
            .stage
            .parse::<PipelineStage>()
            .map_err(|_| FormError::InvalidStage(form.stage.clone()))?;
        Ok(LeadPatch::stage(stage))
    }
}
