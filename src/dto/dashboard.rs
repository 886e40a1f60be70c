//! DTOs shaped for the dashboard landing page.

use serde::Serialize;

use crate::domain::activity::Activity;
use crate::domain::stage::PipelineStage;

/// Headline figure with its month-over-month delta.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub delta: u32,
    pub icon: &'static str,
    pub color: &'static str,
}

/// One row of the "Pipeline by Stage" chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StageBar {
    pub stage: PipelineStage,
    pub color: &'static str,
    pub count: usize,
    pub value_display: String,
    /// Share of open plus won value, 0..=100.
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActivityRow {
    pub icon: &'static str,
    pub activity: Activity,
}

impl From<Activity> for ActivityRow {
    fn from(activity: Activity) -> Self {
        Self {
            icon: activity.kind.icon(),
            activity,
        }
    }
}

/// Data required to render the dashboard template.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPageData {
    pub greeting: String,
    pub metrics: Vec<MetricCard>,
    pub stage_bars: Vec<StageBar>,
    pub activities: Vec<ActivityRow>,
}
