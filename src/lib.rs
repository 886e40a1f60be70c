//! In-memory sales pipeline: a lead store with filtering, portfolio metrics,
//! email templating and a simulated send flow behind a single-session
//! dashboard reducer.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod format;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod notification;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod scheduler;
#[cfg(feature = "data")]
pub mod seed;

#[cfg(feature = "app")]
pub mod app;
#[cfg(feature = "app")]
pub mod dto;
#[cfg(feature = "app")]
mod error_conversions;
#[cfg(feature = "app")]
pub mod models;
#[cfg(feature = "app")]
pub mod services;
#[cfg(feature = "app")]
pub mod views;

#[cfg(feature = "app")]
use crate::app::{Action, AppState, View};
#[cfg(feature = "app")]
use crate::models::config::AppConfig;

/// Seeds a session with the sample leads, renders every page to stdout and
/// plays one simulated send through the virtual clock.
#[cfg(feature = "app")]
pub fn run(config: AppConfig) -> std::io::Result<()> {
    let tera = views::load_templates(&config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let opened_at = chrono::Local::now().naive_local();
    let mut state = AppState::with_sample_data(config, opened_at);

    for view in View::ALL {
        state = state.update(Action::Navigate(view));
        print_page(&tera, &state)?;
    }

    let recipient = state.leads().first().map(|lead| lead.id);
    let send_delay = state.config().send_delay_ms;
    let close_delay = state.config().close_delay_ms;
    state = state
        .update(Action::Navigate(View::EmailCampaigns))
        .update(Action::OpenComposer { recipient })
        .update(Action::SendEmail);
    print_page(&tera, &state)?;

    state = state.update(Action::Tick(send_delay));
    print_page(&tera, &state)?;

    state = state
        .update(Action::Tick(close_delay))
        .update(Action::Navigate(View::Dashboard));
    print_page(&tera, &state)
}

#[cfg(feature = "app")]
fn print_page(tera: &tera::Tera, state: &AppState) -> std::io::Result<()> {
    let page = views::render_page(tera, state)
        .map_err(|e| std::io::Error::other(format!("Failed to render page: {e}")))?;
    println!("{page}");
    Ok(())
}
