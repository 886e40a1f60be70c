//! Portfolio roll-ups over the full lead collection.
//!
//! All functions are pure and sum in collection order, so identical inputs
//! always produce identical figures.

use serde::Serialize;

use crate::domain::lead::Lead;
use crate::domain::stage::PipelineStage;
use crate::domain::types::DealValue;

/// Count and summed deal value of the leads in one stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct StageBreakdown {
    pub count: usize,
    pub value: DealValue,
}

/// Headline figures for the dashboard metric cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PortfolioMetrics {
    pub pipeline_value: DealValue,
    pub closed_won_value: DealValue,
    pub closed_won_count: usize,
    pub total_leads: usize,
}

impl PortfolioMetrics {
    pub fn from_leads(leads: &[Lead]) -> Self {
        Self {
            pipeline_value: pipeline_value(leads),
            closed_won_value: closed_won_value(leads),
            closed_won_count: closed_won_count(leads),
            total_leads: leads.len(),
        }
    }
}

/// Summed value of leads that are neither won nor lost.
pub fn pipeline_value(leads: &[Lead]) -> DealValue {
    leads
        .iter()
        .filter(|lead| lead.stage.is_open())
        .map(|lead| lead.value)
        .sum()
}

pub fn closed_won_value(leads: &[Lead]) -> DealValue {
    stage_breakdown(leads, PipelineStage::ClosedWon).value
}

pub fn closed_won_count(leads: &[Lead]) -> usize {
    stage_breakdown(leads, PipelineStage::ClosedWon).count
}

pub fn stage_breakdown(leads: &[Lead], stage: PipelineStage) -> StageBreakdown {
    leads
        .iter()
        .filter(|lead| lead.stage == stage)
        .fold(StageBreakdown::default(), |acc, lead| StageBreakdown {
            count: acc.count + 1,
            value: acc.value + lead.value,
        })
}

/// Share of `stage_value` in open plus won value, as a percentage.
///
/// Returns 0 when that denominator is zero.
pub fn stage_percent_of_total(
    stage_value: DealValue,
    pipeline_value: DealValue,
    closed_won_value: DealValue,
) -> f64 {
    let total = pipeline_value.get() + closed_won_value.get();
    if total == 0.0 {
        return 0.0;
    }
    stage_value.get() / total * 100.0
}
