use serde::Serialize;

use crate::domain::email_template::EmailTemplate;
use crate::domain::types::LeadId;
use crate::services::email::{EmailComposer, SendState};

/// Recipient choice offered by the composer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecipientOption {
    pub id: LeadId,
    pub label: String,
    pub selected: bool,
}

/// Snapshot of an open composer session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ComposerData {
    pub template_id: i32,
    pub templates: Vec<EmailTemplate>,
    pub recipients: Vec<RecipientOption>,
    pub subject: String,
    pub body: String,
    pub state: SendState,
    pub can_send: bool,
}

impl ComposerData {
    pub fn new(composer: &EmailComposer, recipients: Vec<RecipientOption>) -> Self {
        Self {
            template_id: composer.template().id,
            templates: crate::domain::email_template::EMAIL_TEMPLATES.to_vec(),
            recipients,
            subject: composer.subject().to_string(),
            body: composer.body().to_string(),
            state: composer.state(),
            can_send: composer.can_send(),
        }
    }
}
