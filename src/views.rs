//! Text rendering of the dashboard pages through Tera templates.

use tera::{Context, Tera};
use thiserror::Error;

use crate::app::{AppState, View};
use crate::services::ServiceError;
use crate::services::dashboard as dashboard_service;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

/// Template file rendered for each view.
pub const fn template_name(view: View) -> &'static str {
    match view {
        View::Dashboard => "dashboard.txt",
        View::Leads => "leads.txt",
        View::Pipeline => "pipeline.txt",
        View::EmailCampaigns => "campaigns.txt",
    }
}

#[derive(serde::Serialize)]
struct NavItem {
    label: &'static str,
    active: bool,
}

/// Parses every template matched by `templates_dir` (a glob such as
/// `templates/**/*`).
pub fn load_templates(templates_dir: &str) -> Result<Tera, ViewError> {
    Tera::new(templates_dir).map_err(|err| {
        log::error!("Template parsing error(s): {err}");
        ViewError::from(err)
    })
}

/// Renders the active view of `state`, including any open modal and the
/// current notification.
pub fn render_page(tera: &Tera, state: &AppState) -> Result<String, ViewError> {
    let repo = state.repo();
    let query = state.list_query();
    let mut context = Context::new();

    let nav: Vec<NavItem> = View::ALL
        .into_iter()
        .map(|view| NavItem {
            label: view.label(),
            active: view == state.view(),
        })
        .collect();
    context.insert("nav", &nav);
    context.insert("notification", &state.notification());
    context.insert("show_add_lead", &state.is_add_lead_open());

    match state.view() {
        View::Dashboard => {
            let page = dashboard_service::load_dashboard_page(
                repo,
                state.sent_count(),
                &state.config().operator_greeting,
            )?;
            context.insert("page", &page);
        }
        View::Leads => {
            context.insert("page", &dashboard_service::load_leads_page(repo, &query)?);
        }
        View::Pipeline => {
            context.insert("page", &dashboard_service::load_pipeline_board(repo, &query)?);
        }
        View::EmailCampaigns => {
            context.insert("page", &dashboard_service::load_campaigns_page());
        }
    }

    let lead_detail = match state.selected_lead() {
        Some(lead) => dashboard_service::load_lead_detail(repo, lead.id)?,
        None => None,
    };
    context.insert("lead_detail", &lead_detail);
    let composer = state
        .composer()
        .map(|composer| dashboard_service::load_composer(repo, composer))
        .transpose()?;
    context.insert("composer", &composer);

    tera.render(template_name(state.view()), &context)
        .map_err(|err| {
            log::error!("Failed to render {}: {err}", template_name(state.view()));
            ViewError::from(err)
        })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;

    use super::*;
    use crate::app::Action;
    use crate::domain::types::LeadId;
    use crate::models::config::AppConfig;

    fn state() -> AppState {
        AppState::with_sample_data(
            AppConfig::default(),
            NaiveDate::from_ymd_opt(2026, 2, 21)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    fn tera_with(templates: &[(&str, &str)]) -> (tempfile::TempDir, Tera) {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in templates {
            fs::write(dir.path().join(name), body).unwrap();
        }
        let glob = format!("{}/**/*", dir.path().display());
        let tera = load_templates(&glob).unwrap();
        (dir, tera)
    }

    #[test]
    fn renders_active_view_template() {
        let (_dir, tera) = tera_with(&[
            (
                "dashboard.txt",
                "{{ page.greeting }}|{% for m in page.metrics %}{{ m.value }};{% endfor %}",
            ),
            ("leads.txt", "{{ page.total }}"),
            ("pipeline.txt", "{{ page.columns | length }}"),
            ("campaigns.txt", "{{ page.campaigns | length }}"),
        ]);

        let state = state();
        let out = render_page(&tera, &state).unwrap();
        assert_eq!(out, "Good morning, Alex 👋|£431,500;£8,500;8;12;");

        let state = state.update(Action::Navigate(View::Pipeline));
        assert_eq!(render_page(&tera, &state).unwrap(), "5");

        let state = state
            .update(Action::Navigate(View::Leads))
            .update(Action::Search("orbit".to_string()));
        assert_eq!(render_page(&tera, &state).unwrap(), "1");
    }

    #[test]
    fn composer_is_exposed_when_open() {
        let (_dir, tera) = tera_with(&[(
            "dashboard.txt",
            "{% if composer %}{{ composer.subject }}{% else %}none{% endif %}",
        )]);

        let state = state();
        assert_eq!(render_page(&tera, &state).unwrap(), "none");

        let state = state.update(Action::OpenComposer {
            recipient: Some(LeadId::new(5).unwrap()),
        });
        assert_eq!(
            render_page(&tera, &state).unwrap(),
            "Quick question about DataStream GmbH"
        );
    }

    #[test]
    fn missing_template_is_an_error() {
        let (_dir, tera) = tera_with(&[("dashboard.txt", "ok")]);
        let state = state().update(Action::Navigate(View::EmailCampaigns));

        assert!(matches!(render_page(&tera, &state), Err(ViewError::Template(_))));
    }
}
