//! Static email template catalog and placeholder substitution.

use serde::Serialize;

use crate::domain::lead::Lead;
use crate::domain::types::TemplateId;

pub const NAME_TOKEN: &str = "{name}";
pub const COMPANY_TOKEN: &str = "{company}";
pub const SENDER_TOKEN: &str = "{sender}";

/// Immutable template definition with `{name}`, `{company}` and `{sender}` tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EmailTemplate {
    pub id: i32,
    pub name: &'static str,
    pub subject: &'static str,
    pub body: &'static str,
}

/// The built-in catalog, in display order.
pub const EMAIL_TEMPLATES: [EmailTemplate; 4] = [
    EmailTemplate {
        id: 1,
        name: "Initial Outreach",
        subject: "Quick question about {company}",
        body: "Hi {name},\n\nI came across {company} and was impressed by what you're building. I'd love to explore how we might work together...\n\nBest,\n{sender}",
    },
    EmailTemplate {
        id: 2,
        name: "Follow Up",
        subject: "Following up – {company}",
        body: "Hi {name},\n\nJust circling back on my previous message. I understand you're busy, but I believe we can add real value to {company}...\n\nBest,\n{sender}",
    },
    EmailTemplate {
        id: 3,
        name: "Proposal",
        subject: "Proposal for {company} – Next Steps",
        body: "Hi {name},\n\nAs discussed, I've put together a tailored proposal for {company}. Please find the key highlights below...\n\nBest,\n{sender}",
    },
    EmailTemplate {
        id: 4,
        name: "Closing",
        subject: "Ready to move forward, {name}?",
        body: "Hi {name},\n\nI wanted to check in as we approach the end of the quarter. I'd love to finalize our partnership with {company}...\n\nBest,\n{sender}",
    },
];

impl EmailTemplate {
    /// Looks up a catalog template by identifier.
    pub fn find(id: TemplateId) -> Option<&'static EmailTemplate> {
        EMAIL_TEMPLATES
            .iter()
            .find(|template| template.id == id.get())
    }

    /// Template selected when the composer opens.
    pub fn default_template() -> &'static EmailTemplate {
        &EMAIL_TEMPLATES[0]
    }

    /// Fills placeholders against `lead`; unbound tokens stay literal.
    ///
    /// `{name}` becomes the lead's first name, `{company}` the company and
    /// `{sender}` the operator identity. Every occurrence is replaced.
    pub fn render(&self, lead: Option<&Lead>, sender: &str) -> RenderedEmail {
        RenderedEmail {
            subject: fill(self.subject, lead, sender),
            body: fill(self.body, lead, sender),
        }
    }
}

/// Subject and body produced by [`EmailTemplate::render`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

fn fill(pattern: &str, lead: Option<&Lead>, sender: &str) -> String {
    let (name, company) = match lead {
        Some(lead) => (lead.name.first_name(), lead.company.as_str()),
        None => (NAME_TOKEN, COMPANY_TOKEN),
    };
    pattern
        .replace(NAME_TOKEN, name)
        .replace(COMPANY_TOKEN, company)
        .replace(SENDER_TOKEN, sender)
}
