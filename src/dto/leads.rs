//! DTOs shaped for the leads table and the lead detail modal.

use serde::Serialize;

use crate::domain::lead::Lead;
use crate::domain::stage::{PipelineStage, StageFilter};
use crate::format::{avatar_color, format_currency, tag_color};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagBadge {
    pub label: String,
    pub color: &'static str,
}

impl TagBadge {
    pub fn for_tags(tags: &[String]) -> Vec<TagBadge> {
        tags.iter()
            .map(|tag| TagBadge {
                label: tag.clone(),
                color: tag_color(tag),
            })
            .collect()
    }
}

/// One row of the leads table, with display strings precomputed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeadRow {
    pub lead: Lead,
    pub value_display: String,
    pub avatar_color: &'static str,
    pub stage_color: &'static str,
    pub tags: Vec<TagBadge>,
}

impl From<&Lead> for LeadRow {
    fn from(lead: &Lead) -> Self {
        Self {
            value_display: format_currency(lead.value),
            avatar_color: avatar_color(lead.name.as_str()),
            stage_color: lead.stage.color(),
            tags: TagBadge::for_tags(&lead.tags),
            lead: lead.clone(),
        }
    }
}

/// A stage filter button and whether it is the active selection.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StageFilterOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Data required to render the leads table.
#[derive(Debug, Clone, Serialize)]
pub struct LeadsPageData {
    pub rows: Vec<LeadRow>,
    /// Number of leads matching the current search and stage filter.
    pub total: usize,
    pub search_query: Option<String>,
    pub stage_filter: StageFilter,
    pub stage_options: Vec<StageFilterOption>,
}

/// Lead detail modal: the selected lead plus the stages it can be moved to.
#[derive(Debug, Clone, Serialize)]
pub struct LeadDetailData {
    pub row: LeadRow,
    pub stages: Vec<PipelineStage>,
}
