//! Email composer draft and the simulated send state machine.

use serde::Serialize;

use crate::domain::email_template::EmailTemplate;
use crate::domain::lead::Lead;
use crate::domain::types::{LeadId, TemplateId};

/// Progress of a simulated send. There is no failure state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SendState {
    #[default]
    Idle,
    Sending,
    Sent,
}

/// One composer session: recipient, template and editable subject/body.
///
/// Changing the template or the recipient re-renders subject and body from
/// the current selection, discarding manual edits made since the last change.
#[derive(Clone, Debug, PartialEq)]
pub struct EmailComposer {
    session: u64,
    sender: String,
    recipient: Option<LeadId>,
    template: &'static EmailTemplate,
    subject: String,
    body: String,
    state: SendState,
}

impl EmailComposer {
    /// Opens a draft on the default template, bound to `recipient` when given.
    pub fn open(
        session: u64,
        sender: impl Into<String>,
        recipient: Option<LeadId>,
        leads: &[Lead],
    ) -> Self {
        let mut composer = Self {
            session,
            sender: sender.into(),
            recipient,
            template: EmailTemplate::default_template(),
            subject: String::new(),
            body: String::new(),
            state: SendState::Idle,
        };
        composer.rerender(leads);
        composer
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn recipient(&self) -> Option<LeadId> {
        self.recipient
    }

    pub fn template(&self) -> &'static EmailTemplate {
        self.template
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn state(&self) -> SendState {
        self.state
    }

    /// Switches template; unknown ids leave the draft untouched.
    pub fn select_template(&mut self, id: TemplateId, leads: &[Lead]) -> bool {
        let Some(template) = EmailTemplate::find(id) else {
            return false;
        };
        self.template = template;
        self.rerender(leads);
        true
    }

    pub fn select_recipient(&mut self, recipient: Option<LeadId>, leads: &[Lead]) {
        self.recipient = recipient;
        self.rerender(leads);
    }

    pub fn edit_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn edit_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Send is allowed only with a recipient and while idle.
    pub fn can_send(&self) -> bool {
        self.recipient.is_some() && self.state == SendState::Idle
    }

    /// Idle → Sending. Returns `false` (and changes nothing) when the guard fails.
    pub fn begin_send(&mut self) -> bool {
        if !self.can_send() {
            return false;
        }
        self.state = SendState::Sending;
        true
    }

    /// Sending → Sent.
    pub fn finish_send(&mut self) -> bool {
        if self.state != SendState::Sending {
            return false;
        }
        self.state = SendState::Sent;
        true
    }

    fn rerender(&mut self, leads: &[Lead]) {
        let lead = self
            .recipient
            .and_then(|id| leads.iter().find(|lead| lead.id == id));
        let rendered = self.template.render(lead, &self.sender);
        self.subject = rendered.subject;
        self.body = rendered.body;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_leads;

    const SENDER: &str = "Alex Martinez";

    fn lead_id(id: i64) -> LeadId {
        LeadId::new(id).unwrap()
    }

    fn template_id(id: i32) -> TemplateId {
        TemplateId::new(id).unwrap()
    }

    #[test]
    fn opening_without_recipient_keeps_tokens() {
        let composer = EmailComposer::open(1, SENDER, None, &sample_leads());

        assert_eq!(composer.subject(), "Quick question about {company}");
        assert!(composer.body().ends_with(SENDER));
        assert_eq!(composer.state(), SendState::Idle);
    }

    #[test]
    fn preselected_recipient_is_rendered_immediately() {
        let composer = EmailComposer::open(1, SENDER, Some(lead_id(3)), &sample_leads());

        assert_eq!(composer.subject(), "Quick question about Stellar AI");
        assert!(composer.body().starts_with("Hi Priya,"));
    }

    #[test]
    fn template_switch_discards_manual_edits() {
        let leads = sample_leads();
        let mut composer = EmailComposer::open(1, SENDER, Some(lead_id(1)), &leads);
        composer.edit_subject("custom subject");
        composer.edit_body("custom body");
        assert_eq!(composer.subject(), "custom subject");

        assert!(composer.select_template(template_id(4), &leads));

        assert_eq!(composer.subject(), "Ready to move forward, Sarah?");
        assert!(composer.body().contains("Nexus Corp"));
    }

    #[test]
    fn recipient_switch_rerenders_current_template() {
        let leads = sample_leads();
        let mut composer = EmailComposer::open(1, SENDER, None, &leads);
        composer.select_template(template_id(3), &leads);
        composer.edit_body("draft");

        composer.select_recipient(Some(lead_id(8)), &leads);

        assert_eq!(composer.subject(), "Proposal for FlowStack – Next Steps");
        assert!(composer.body().starts_with("Hi Tom,"));

        composer.select_recipient(None, &leads);
        assert_eq!(composer.subject(), "Proposal for {company} – Next Steps");
    }

    #[test]
    fn unknown_template_is_ignored() {
        let leads = sample_leads();
        let mut composer = EmailComposer::open(1, SENDER, None, &leads);
        let before = composer.clone();

        assert!(!composer.select_template(template_id(42), &leads));
        assert_eq!(composer, before);
    }

    #[test]
    fn send_requires_recipient() {
        let mut composer = EmailComposer::open(1, SENDER, None, &sample_leads());

        assert!(!composer.begin_send());
        assert_eq!(composer.state(), SendState::Idle);
        assert!(!composer.finish_send());
    }

    #[test]
    fn send_walks_idle_sending_sent_once() {
        let mut composer = EmailComposer::open(1, SENDER, Some(lead_id(2)), &sample_leads());

        assert!(composer.begin_send());
        assert!(!composer.begin_send());
        assert_eq!(composer.state(), SendState::Sending);
        assert!(composer.finish_send());
        assert_eq!(composer.state(), SendState::Sent);
        assert!(!composer.begin_send());
    }
}
