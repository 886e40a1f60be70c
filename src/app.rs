//! Dashboard session state and its `(state, action) -> state` reducer.
//!
//! Every user interaction and every timer expiry goes through
//! [`AppState::update`]. Delayed transitions are queued on the session's
//! virtual-time [`Scheduler`] and fire only when a [`Action::Tick`] moves the
//! clock past their deadline.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::domain::lead::{Lead, LeadPatch};
use crate::domain::stage::StageFilter;
use crate::domain::types::{LeadId, TemplateId};
use crate::forms::leads::{AddLeadForm, MoveStageForm};
use crate::models::config::AppConfig;
use crate::notification::{Notification, NotificationSink};
use crate::repository::{InMemoryRepository, LeadListQuery, LeadReader, LeadSnapshot, filter_leads};
use crate::scheduler::{Scheduler, TimerId};
use crate::seed;
use crate::services::email::EmailComposer;
use crate::services::leads as lead_service;
use crate::services::ServiceResult;

pub const LEAD_ADDED_MESSAGE: &str = "Lead added ✓";
pub const LEAD_UPDATED_MESSAGE: &str = "Lead updated ✓";

/// Sidebar destinations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    #[default]
    Dashboard,
    Leads,
    Pipeline,
    EmailCampaigns,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Leads, View::Pipeline, View::EmailCampaigns];

    pub const fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Leads => "Leads",
            View::Pipeline => "Pipeline",
            View::EmailCampaigns => "Email Campaigns",
        }
    }
}

/// Events queued on the session scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    NotificationExpired { generation: u64 },
    SendCompleted { session: u64 },
    ComposerAutoClose { session: u64 },
}

/// Discrete inputs accepted by [`AppState::update`].
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Navigate(View),
    Search(String),
    FilterStage(StageFilter),
    OpenAddLead,
    CloseAddLead,
    SubmitAddLead(AddLeadForm),
    SelectLead(LeadId),
    CloseLead,
    UpdateLead { id: LeadId, patch: LeadPatch },
    /// Stage picked in the lead detail modal.
    MoveStage { id: LeadId, form: MoveStageForm },
    AdvanceStage(LeadId),
    RetreatStage(LeadId),
    /// Opens the composer, optionally bound to a recipient.
    OpenComposer { recipient: Option<LeadId> },
    /// Closes the lead detail modal and composes to that lead.
    EmailLead(LeadId),
    SelectTemplate(TemplateId),
    SelectRecipient(Option<LeadId>),
    EditSubject(String),
    EditBody(String),
    SendEmail,
    CloseComposer,
    /// Moves the virtual clock forward and fires due timers.
    Tick(u64),
}

/// Everything a single dashboard session holds in memory.
#[derive(Debug, Clone)]
pub struct AppState {
    config: AppConfig,
    repo: InMemoryRepository,
    opened_at: NaiveDateTime,
    view: View,
    search: String,
    stage_filter: StageFilter,
    selected_lead: Option<Lead>,
    show_add_lead: bool,
    composer: Option<EmailComposer>,
    composer_timer: Option<TimerId>,
    next_session: u64,
    sent_count: u32,
    notifications: NotificationSink,
    scheduler: Scheduler<TimerEvent>,
}

impl AppState {
    /// Session whose clock starts at `opened_at`; the virtual clock advances it.
    pub fn new(config: AppConfig, leads: Vec<Lead>, opened_at: NaiveDateTime) -> Self {
        Self {
            sent_count: config.initial_sent_count,
            config,
            repo: InMemoryRepository::new(leads),
            opened_at,
            view: View::default(),
            search: String::new(),
            stage_filter: StageFilter::default(),
            selected_lead: None,
            show_add_lead: false,
            composer: None,
            composer_timer: None,
            next_session: 0,
            notifications: NotificationSink::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Session seeded with the built-in sample leads.
    pub fn with_sample_data(config: AppConfig, opened_at: NaiveDateTime) -> Self {
        Self::new(config, seed::sample_leads(), opened_at)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn repo(&self) -> &InMemoryRepository {
        &self.repo
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn stage_filter(&self) -> StageFilter {
        self.stage_filter
    }

    pub fn selected_lead(&self) -> Option<&Lead> {
        self.selected_lead.as_ref()
    }

    pub fn is_add_lead_open(&self) -> bool {
        self.show_add_lead
    }

    pub fn composer(&self) -> Option<&EmailComposer> {
        self.composer.as_ref()
    }

    pub fn sent_count(&self) -> u32 {
        self.sent_count
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Calendar date at the current point of the virtual clock.
    pub fn today(&self) -> NaiveDate {
        i64::try_from(self.scheduler.now_ms())
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|elapsed| self.opened_at.checked_add_signed(elapsed))
            .unwrap_or(self.opened_at)
            .date()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Current snapshot of the full collection.
    pub fn leads(&self) -> LeadSnapshot {
        match self.repo.list_leads() {
            Ok(leads) => leads,
            Err(err) => {
                log::error!("Failed to list leads: {err}");
                LeadSnapshot::default()
            }
        }
    }

    /// Search text and stage filter as a list query.
    pub fn list_query(&self) -> LeadListQuery {
        LeadListQuery::new()
            .search(self.search.clone())
            .stage(self.stage_filter)
    }

    /// Leads visible in the table and on the board.
    pub fn filtered_leads(&self) -> Vec<Lead> {
        filter_leads(&self.leads(), &self.search, self.stage_filter)
    }

    /// Applies one action and returns the next state.
    #[must_use]
    pub fn update(mut self, action: Action) -> Self {
        match action {
            Action::Navigate(view) => self.view = view,
            Action::Search(search) => self.search = search,
            Action::FilterStage(filter) => self.stage_filter = filter,
            Action::OpenAddLead => self.show_add_lead = true,
            Action::CloseAddLead => self.show_add_lead = false,
            Action::SubmitAddLead(form) => self.submit_add_lead(form),
            Action::SelectLead(id) => self.select_lead(id),
            Action::CloseLead => self.selected_lead = None,
            Action::UpdateLead { id, patch } => self.patch_lead(id, &patch),
            Action::MoveStage { id, form } => match LeadPatch::try_from(form) {
                Ok(patch) => self.patch_lead(id, &patch),
                Err(err) => log::error!("Rejected stage move for lead {id}: {err}"),
            },
            Action::AdvanceStage(id) => {
                self.step_stage(id, |repo, id| lead_service::advance_lead_stage(repo, id))
            }
            Action::RetreatStage(id) => {
                self.step_stage(id, |repo, id| lead_service::retreat_lead_stage(repo, id))
            }
            Action::OpenComposer { recipient } => self.open_composer(recipient),
            Action::EmailLead(id) => {
                self.selected_lead = None;
                self.open_composer(Some(id));
            }
            Action::SelectTemplate(id) => {
                let leads = self.leads();
                if let Some(composer) = self.composer.as_mut() {
                    if !composer.select_template(id, &leads) {
                        log::debug!("Ignoring unknown template {id}");
                    }
                }
            }
            Action::SelectRecipient(recipient) => {
                let leads = self.leads();
                if let Some(composer) = self.composer.as_mut() {
                    composer.select_recipient(recipient, &leads);
                }
            }
            Action::EditSubject(subject) => {
                if let Some(composer) = self.composer.as_mut() {
                    composer.edit_subject(subject);
                }
            }
            Action::EditBody(body) => {
                if let Some(composer) = self.composer.as_mut() {
                    composer.edit_body(body);
                }
            }
            Action::SendEmail => self.send_email(),
            Action::CloseComposer => self.close_composer(),
            Action::Tick(elapsed_ms) => self.tick(elapsed_ms),
        }
        self
    }

    fn submit_add_lead(&mut self, form: AddLeadForm) {
        let today = self.today();
        match lead_service::add_lead(&mut self.repo, form, today) {
            Ok(Some(_)) => {
                self.show_add_lead = false;
                self.notify(LEAD_ADDED_MESSAGE);
            }
            Ok(None) => {}
            Err(err) => log::error!("Failed to add lead: {err}"),
        }
    }

    fn select_lead(&mut self, id: LeadId) {
        match self.repo.get_lead_by_id(id) {
            Ok(lead) => self.selected_lead = lead,
            Err(err) => log::error!("Failed to load lead {id}: {err}"),
        }
    }

    fn patch_lead(&mut self, id: LeadId, patch: &LeadPatch) {
        match lead_service::update_lead(&mut self.repo, id, patch) {
            Ok(updated) => {
                if let Some(lead) = updated {
                    self.sync_selected(lead);
                }
                self.notify(LEAD_UPDATED_MESSAGE);
            }
            Err(err) => log::error!("Failed to update lead {id}: {err}"),
        }
    }

    fn step_stage<F>(&mut self, id: LeadId, step: F)
    where
        F: FnOnce(&mut InMemoryRepository, LeadId) -> ServiceResult<Option<Lead>>,
    {
        let before = self.leads().iter().find(|lead| lead.id == id).map(|lead| lead.stage);
        match step(&mut self.repo, id) {
            Ok(Some(lead)) => {
                let moved = before != Some(lead.stage);
                self.sync_selected(lead);
                if moved {
                    self.notify(LEAD_UPDATED_MESSAGE);
                }
            }
            Ok(None) => log::debug!("No lead with id {id} to move"),
            Err(err) => log::error!("Failed to move lead {id}: {err}"),
        }
    }

    fn sync_selected(&mut self, lead: Lead) {
        if self
            .selected_lead
            .as_ref()
            .is_some_and(|selected| selected.id == lead.id)
        {
            self.selected_lead = Some(lead);
        }
    }

    fn open_composer(&mut self, recipient: Option<LeadId>) {
        self.cancel_composer_timer();
        self.next_session += 1;
        let leads = self.leads();
        self.composer = Some(EmailComposer::open(
            self.next_session,
            self.config.sender_name.clone(),
            recipient,
            &leads,
        ));
    }

    fn send_email(&mut self) {
        let Some(composer) = self.composer.as_mut() else {
            return;
        };
        if !composer.begin_send() {
            log::debug!("Send ignored in state {:?}", composer.state());
            return;
        }
        let session = composer.session();
        self.composer_timer = Some(
            self.scheduler
                .schedule(self.config.send_delay_ms, TimerEvent::SendCompleted { session }),
        );
    }

    fn close_composer(&mut self) {
        self.cancel_composer_timer();
        self.composer = None;
    }

    fn cancel_composer_timer(&mut self) {
        if let Some(timer) = self.composer_timer.take() {
            self.scheduler.cancel(timer);
        }
    }

    fn notify(&mut self, message: &str) {
        self.notifications.notify(
            &mut self.scheduler,
            message,
            self.config.notification_ttl_ms,
            |generation| TimerEvent::NotificationExpired { generation },
        );
    }

    fn tick(&mut self, elapsed_ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some(event) = self.scheduler.pop_due(until) {
            self.handle_timer(event);
        }
    }

    fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::NotificationExpired { generation } => {
                self.notifications.expire(generation);
            }
            TimerEvent::SendCompleted { session } => {
                let Some(composer) = self.live_composer(session) else {
                    log::warn!("Send completion for closed composer session {session}");
                    return;
                };
                if composer.finish_send() {
                    self.composer_timer = Some(self.scheduler.schedule(
                        self.config.close_delay_ms,
                        TimerEvent::ComposerAutoClose { session },
                    ));
                }
            }
            TimerEvent::ComposerAutoClose { session } => {
                if self.live_composer(session).is_none() {
                    log::warn!("Auto-close for closed composer session {session}");
                    return;
                }
                self.sent_count += 1;
                self.composer = None;
                self.composer_timer = None;
                log::info!("Simulated email sent, {} in total", self.sent_count);
            }
        }
    }

    fn live_composer(&mut self, session: u64) -> Option<&mut EmailComposer> {
        self.composer
            .as_mut()
            .filter(|composer| composer.session() == session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stage::PipelineStage;
    use crate::services::email::SendState;

    fn opened_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 21)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn state() -> AppState {
        AppState::with_sample_data(AppConfig::default(), opened_at())
    }

    fn lead_id(id: i64) -> LeadId {
        LeadId::new(id).unwrap()
    }

    fn run(state: AppState, actions: impl IntoIterator<Item = Action>) -> AppState {
        actions.into_iter().fold(state, AppState::update)
    }

    #[test]
    fn add_closes_modal_and_notifies() {
        let state = run(
            state(),
            [
                Action::OpenAddLead,
                Action::SubmitAddLead(AddLeadForm::new("Ana Li", "Acme", "a@acme.com")),
            ],
        );

        assert!(!state.is_add_lead_open());
        assert_eq!(state.leads().len(), 9);
        assert_eq!(state.leads()[0].initials, "AL");
        assert_eq!(
            state.notification().map(|n| n.message.as_str()),
            Some(LEAD_ADDED_MESSAGE)
        );
    }

    #[test]
    fn added_lead_takes_date_from_session_clock() {
        let state = state().update(Action::SubmitAddLead(AddLeadForm::new(
            "Ana Li",
            "Acme",
            "a@acme.com",
        )));
        assert_eq!(state.leads()[0].last_contact, opened_at().date());

        // 15 hours after 09:00 is midnight of the next day.
        let state = state.update(Action::Tick(15 * 60 * 60 * 1000)).update(
            Action::SubmitAddLead(AddLeadForm::new("Bo Ren", "Orbit", "bo@orbit.io")),
        );

        let next_day = NaiveDate::from_ymd_opt(2026, 2, 22).unwrap();
        assert_eq!(state.today(), next_day);
        assert_eq!(state.leads()[0].last_contact, next_day);
        assert_eq!(state.leads()[1].last_contact, opened_at().date());
    }

    #[test]
    fn declined_add_keeps_modal_open() {
        let state = run(
            state(),
            [
                Action::OpenAddLead,
                Action::SubmitAddLead(AddLeadForm::new("Ana Li", "", "a@acme.com")),
            ],
        );

        assert!(state.is_add_lead_open());
        assert_eq!(state.leads().len(), 8);
        assert!(state.notification().is_none());
    }

    #[test]
    fn notification_expires_after_ttl() {
        let id = lead_id(1);
        let state = run(
            state(),
            [
                Action::UpdateLead { id, patch: LeadPatch::stage(PipelineStage::Proposal) },
                Action::Tick(2999),
            ],
        );
        assert!(state.notification().is_some());

        let state = state.update(Action::Tick(1));
        assert!(state.notification().is_none());
    }

    #[test]
    fn newer_notification_restarts_expiry() {
        let id = lead_id(1);
        let state = run(
            state(),
            [
                Action::UpdateLead { id, patch: LeadPatch::stage(PipelineStage::Proposal) },
                Action::Tick(2000),
                Action::SubmitAddLead(AddLeadForm::new("Ana Li", "Acme", "a@acme.com")),
                Action::Tick(2000),
            ],
        );
        assert_eq!(
            state.notification().map(|n| n.message.as_str()),
            Some(LEAD_ADDED_MESSAGE)
        );

        let state = state.update(Action::Tick(1000));
        assert!(state.notification().is_none());
    }

    #[test]
    fn update_keeps_detail_modal_in_sync() {
        let id = lead_id(4);
        let state = run(
            state(),
            [
                Action::SelectLead(id),
                Action::UpdateLead { id, patch: LeadPatch::stage(PipelineStage::Negotiation) },
            ],
        );

        assert_eq!(
            state.selected_lead().map(|lead| lead.stage),
            Some(PipelineStage::Negotiation)
        );
    }

    #[test]
    fn detail_modal_moves_stage_by_label() {
        let id = lead_id(2);
        let move_to = |stage: &str| Action::MoveStage {
            id,
            form: MoveStageForm { stage: stage.to_string() },
        };
        let state = run(state(), [Action::SelectLead(id), move_to("Closed Lost")]);
        assert_eq!(
            state.selected_lead().map(|lead| lead.stage),
            Some(PipelineStage::ClosedLost)
        );

        let state = run(state, [Action::Tick(3000), move_to("Archived")]);
        assert_eq!(
            state.selected_lead().map(|lead| lead.stage),
            Some(PipelineStage::ClosedLost)
        );
        assert!(state.notification().is_none());
    }

    #[test]
    fn advance_and_retreat_walk_the_board() {
        let id = lead_id(4);
        let state = run(state(), [Action::AdvanceStage(id), Action::AdvanceStage(id)]);
        let lead = state.repo().get_lead_by_id(id).unwrap().unwrap();
        assert_eq!(lead.stage, PipelineStage::Proposal);

        let state = run(state, [Action::RetreatStage(id)]);
        let lead = state.repo().get_lead_by_id(id).unwrap().unwrap();
        assert_eq!(lead.stage, PipelineStage::Qualified);
    }

    #[test]
    fn filter_state_drives_visible_leads() {
        let state = run(state(), [Action::Search("stellar".to_string())]);
        let visible = state.filtered_leads();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].company.as_str(), "Stellar AI");

        let state = run(
            state,
            [
                Action::Search(String::new()),
                Action::FilterStage(StageFilter::Only(PipelineStage::Proposal)),
            ],
        );
        assert_eq!(state.filtered_leads().len(), 2);
    }

    #[test]
    fn send_without_recipient_never_leaves_idle() {
        let state = run(
            state(),
            [
                Action::OpenComposer { recipient: None },
                Action::SendEmail,
                Action::Tick(10_000),
            ],
        );

        let composer = state.composer().unwrap();
        assert_eq!(composer.state(), SendState::Idle);
        assert_eq!(state.sent_count(), 12);
        assert_eq!(state.pending_timers(), 0);
    }

    #[test]
    fn send_completes_then_closes_and_counts() {
        let state = run(
            state(),
            [Action::OpenComposer { recipient: Some(lead_id(2)) }, Action::SendEmail],
        );
        assert_eq!(state.composer().unwrap().state(), SendState::Sending);

        let state = state.update(Action::SendEmail).update(Action::Tick(1500));
        assert_eq!(state.composer().unwrap().state(), SendState::Sent);
        assert_eq!(state.sent_count(), 12);

        let state = state.update(Action::Tick(1500));
        assert!(state.composer().is_none());
        assert_eq!(state.sent_count(), 13);
    }

    #[test]
    fn single_tick_covers_both_delays() {
        let state = run(
            state(),
            [
                Action::OpenComposer { recipient: Some(lead_id(2)) },
                Action::SendEmail,
                Action::Tick(3000),
            ],
        );
        assert!(state.composer().is_none());
        assert_eq!(state.sent_count(), 13);
        assert_eq!(state.now_ms(), 3000);
    }

    #[test]
    fn closing_composer_cancels_pending_send() {
        let state = run(
            state(),
            [
                Action::OpenComposer { recipient: Some(lead_id(2)) },
                Action::SendEmail,
                Action::Tick(500),
                Action::CloseComposer,
            ],
        );
        assert_eq!(state.pending_timers(), 0);

        let state = state.update(Action::Tick(5000));
        assert_eq!(state.sent_count(), 12);
    }

    #[test]
    fn stale_timer_does_not_touch_new_session() {
        let state = run(
            state(),
            [
                Action::OpenComposer { recipient: Some(lead_id(2)) },
                Action::SendEmail,
                Action::Tick(1500),
                Action::OpenComposer { recipient: Some(lead_id(3)) },
            ],
        );
        let state = state.update(Action::Tick(1500));
        let composer = state.composer().unwrap();
        assert_eq!(composer.state(), SendState::Idle);
        assert_eq!(composer.recipient(), Some(lead_id(3)));
        assert_eq!(state.sent_count(), 12);

        let mut state = state;
        state.handle_timer(TimerEvent::ComposerAutoClose { session: 1 });
        state.handle_timer(TimerEvent::SendCompleted { session: 1 });
        assert_eq!(state.composer().unwrap().state(), SendState::Idle);
        assert_eq!(state.sent_count(), 12);
    }

    #[test]
    fn email_lead_closes_detail_and_preselects() {
        let id = lead_id(7);
        let state = run(state(), [Action::SelectLead(id), Action::EmailLead(id)]);

        assert!(state.selected_lead().is_none());
        let composer = state.composer().unwrap();
        assert_eq!(composer.recipient(), Some(id));
        assert_eq!(composer.subject(), "Quick question about QuantumLeap");
    }

    #[test]
    fn composer_edits_survive_until_rebind() {
        let state = run(
            state(),
            [
                Action::OpenComposer { recipient: None },
                Action::EditSubject("hand written".to_string()),
            ],
        );
        assert_eq!(state.composer().unwrap().subject(), "hand written");

        let state = state.update(Action::SelectRecipient(Some(lead_id(1))));
        assert_eq!(state.composer().unwrap().subject(), "Quick question about Nexus Corp");
    }
}
