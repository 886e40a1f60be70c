//! Page loaders turning store snapshots into render-ready DTOs.

use crate::domain::email_template::EMAIL_TEMPLATES;
use crate::domain::lead::Lead;
use crate::domain::stage::{PipelineStage, StageFilter};
use crate::domain::types::LeadId;
use crate::dto::campaigns::{CampaignRow, CampaignsPageData};
use crate::dto::composer::{ComposerData, RecipientOption};
use crate::dto::dashboard::{ActivityRow, DashboardPageData, MetricCard, StageBar};
use crate::dto::leads::{LeadDetailData, LeadRow, LeadsPageData, StageFilterOption};
use crate::dto::pipeline::{KanbanCard, KanbanColumn, PipelineBoardData};
use crate::format::format_currency;
use crate::repository::{LeadListQuery, LeadReader};
use crate::seed;
use crate::services::email::EmailComposer;
use crate::services::metrics::{PortfolioMetrics, stage_breakdown, stage_percent_of_total};
use crate::services::{ServiceError, ServiceResult};

/// Loads the dashboard: metric cards, stage bars and the activity feed.
///
/// Figures are computed over the full collection, never the filtered view.
pub fn load_dashboard_page<R>(
    repo: &R,
    sent_count: u32,
    greeting_name: &str,
) -> ServiceResult<DashboardPageData>
where
    R: LeadReader + ?Sized,
{
    let leads = repo.list_leads().map_err(|err| {
        log::error!("Failed to list leads: {err}");
        ServiceError::from(err)
    })?;
    let metrics = PortfolioMetrics::from_leads(&leads);

    let cards = vec![
        MetricCard {
            label: "Pipeline Value",
            value: format_currency(metrics.pipeline_value),
            delta: 14,
            icon: "💰",
            color: "#6366f1",
        },
        MetricCard {
            label: "Closed Won",
            value: format_currency(metrics.closed_won_value),
            delta: 8,
            icon: "🏆",
            color: "#10b981",
        },
        MetricCard {
            label: "Total Leads",
            value: metrics.total_leads.to_string(),
            delta: 23,
            icon: "👥",
            color: "#3b82f6",
        },
        MetricCard {
            label: "Emails Sent",
            value: sent_count.to_string(),
            delta: 31,
            icon: "✉",
            color: "#8b5cf6",
        },
    ];

    let stage_bars = PipelineStage::KANBAN
        .into_iter()
        .map(|stage| {
            let breakdown = stage_breakdown(&leads, stage);
            StageBar {
                stage,
                color: stage.color(),
                count: breakdown.count,
                value_display: format_currency(breakdown.value),
                percent: stage_percent_of_total(
                    breakdown.value,
                    metrics.pipeline_value,
                    metrics.closed_won_value,
                ),
            }
        })
        .collect();

    Ok(DashboardPageData {
        greeting: format!("Good morning, {greeting_name} 👋"),
        metrics: cards,
        stage_bars,
        activities: seed::recent_activities()
            .into_iter()
            .map(ActivityRow::from)
            .collect(),
    })
}

/// Loads the leads table for the current search text and stage filter.
pub fn load_leads_page<R>(repo: &R, query: &LeadListQuery) -> ServiceResult<LeadsPageData>
where
    R: LeadReader + ?Sized,
{
    let leads = repo.search_leads(query).map_err(|err| {
        log::error!("Failed to search leads: {err}");
        ServiceError::from(err)
    })?;

    let search_query = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(LeadsPageData {
        total: leads.len(),
        rows: leads.iter().map(LeadRow::from).collect(),
        search_query,
        stage_filter: query.stage,
        stage_options: StageFilter::options()
            .into_iter()
            .map(|option| StageFilterOption {
                label: option.as_str(),
                selected: option == query.stage,
            })
            .collect(),
    })
}

/// Builds the kanban board from the filtered leads.
///
/// Closed Lost leads have no column and so never appear on the board.
pub fn load_pipeline_board<R>(repo: &R, query: &LeadListQuery) -> ServiceResult<PipelineBoardData>
where
    R: LeadReader + ?Sized,
{
    let leads = repo.search_leads(query).map_err(ServiceError::from)?;

    let columns = PipelineStage::KANBAN
        .into_iter()
        .map(|stage| {
            let stage_leads: Vec<&Lead> = leads.iter().filter(|lead| lead.stage == stage).collect();
            let total = stage_leads.iter().map(|lead| lead.value).sum();
            KanbanColumn {
                stage,
                color: stage.color(),
                total_display: format_currency(total),
                cards: stage_leads
                    .into_iter()
                    .map(|lead| KanbanCard {
                        row: LeadRow::from(lead),
                        can_back: stage.back().is_some(),
                        can_advance: stage.advance().is_some(),
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(PipelineBoardData { columns })
}

/// Loads the lead detail modal; `Ok(None)` when the lead no longer exists.
pub fn load_lead_detail<R>(repo: &R, id: LeadId) -> ServiceResult<Option<LeadDetailData>>
where
    R: LeadReader + ?Sized,
{
    let lead = repo.get_lead_by_id(id).map_err(ServiceError::from)?;
    Ok(lead.map(|lead| LeadDetailData {
        row: LeadRow::from(&lead),
        stages: PipelineStage::ALL.to_vec(),
    }))
}

/// Static campaign summaries and the template catalog.
pub fn load_campaigns_page() -> CampaignsPageData {
    CampaignsPageData {
        campaigns: seed::campaigns().into_iter().map(CampaignRow::from).collect(),
        templates: EMAIL_TEMPLATES.to_vec(),
    }
}

/// Composer snapshot with every lead offered as a recipient.
pub fn load_composer<R>(repo: &R, composer: &EmailComposer) -> ServiceResult<ComposerData>
where
    R: LeadReader + ?Sized,
{
    let leads = repo.list_leads().map_err(ServiceError::from)?;
    let recipients = leads
        .iter()
        .map(|lead| RecipientOption {
            id: lead.id,
            label: format!("{} <{}>", lead.name, lead.email),
            selected: composer.recipient() == Some(lead.id),
        })
        .collect();
    Ok(ComposerData::new(composer, recipients))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::seed::sample_leads;

    fn repo() -> InMemoryRepository {
        InMemoryRepository::new(sample_leads())
    }

    #[test]
    fn dashboard_cards_use_full_collection() {
        let page = load_dashboard_page(&repo(), 12, "Alex").unwrap();

        let values: Vec<_> = page.metrics.iter().map(|card| card.value.as_str()).collect();
        assert_eq!(values, ["£431,500", "£8,500", "8", "12"]);
        let deltas: Vec<_> = page.metrics.iter().map(|card| card.delta).collect();
        assert_eq!(deltas, [14, 8, 23, 31]);
        assert_eq!(page.greeting, "Good morning, Alex 👋");
        assert_eq!(page.activities.len(), 5);
    }

    #[test]
    fn stage_bars_cover_board_stages_only() {
        let page = load_dashboard_page(&repo(), 0, "Alex").unwrap();

        let stages: Vec<_> = page.stage_bars.iter().map(|bar| bar.stage).collect();
        assert_eq!(stages, PipelineStage::KANBAN);

        let won = &page.stage_bars[4];
        assert_eq!(won.count, 1);
        assert_eq!(won.value_display, "£8,500");
        assert!((won.percent - 8500.0 / 440000.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_store_has_zero_percent_bars() {
        let page = load_dashboard_page(&InMemoryRepository::default(), 0, "Alex").unwrap();
        assert!(page.stage_bars.iter().all(|bar| bar.percent == 0.0));
    }

    #[test]
    fn leads_page_reflects_query() {
        let query = LeadListQuery::new().search("  stellar ");
        let page = load_leads_page(&repo(), &query).unwrap();

        assert_eq!(page.search_query.as_deref(), Some("stellar"));
        assert_eq!(page.stage_options.len(), 7);
        assert!(page.stage_options[0].selected);
    }

    #[test]
    fn board_columns_follow_filter() {
        let query = LeadListQuery::new().search("Enterprise");
        let board = load_pipeline_board(&repo(), &query).unwrap();
        assert!(board.columns.iter().all(|column| column.cards.is_empty()));

        let board = load_pipeline_board(&repo(), &LeadListQuery::new()).unwrap();
        assert_eq!(board.columns.len(), 5);
        let negotiation = &board.columns[3];
        assert_eq!(negotiation.cards.len(), 2);
        assert_eq!(negotiation.total_display, "£252,000");

        let new_card = &board.columns[0].cards[0];
        assert!(!new_card.can_back);
        assert!(new_card.can_advance);
        let won_card = &board.columns[4].cards[0];
        assert!(won_card.can_back);
        assert!(!won_card.can_advance);
    }

    #[test]
    fn campaigns_page_lists_static_data() {
        let page = load_campaigns_page();
        let rates: Vec<_> = page.campaigns.iter().map(|row| row.open_rate).collect();
        assert_eq!(rates, [66, 83, 35]);
        assert_eq!(page.templates.len(), 4);
    }

    #[test]
    fn lead_detail_offers_every_stage() {
        let id = LeadId::new(2).unwrap();
        let detail = load_lead_detail(&repo(), id).unwrap().unwrap();
        assert_eq!(detail.stages.len(), 6);
        assert!(load_lead_detail(&repo(), LeadId::new(99).unwrap()).unwrap().is_none());
    }
}
