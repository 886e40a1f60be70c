use serde::Serialize;

use crate::domain::stage::PipelineStage;
use crate::dto::leads::LeadRow;

#[derive(Debug, Clone, Serialize)]
pub struct KanbanCard {
    pub row: LeadRow,
    pub can_back: bool,
    pub can_advance: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KanbanColumn {
    pub stage: PipelineStage,
    pub color: &'static str,
    pub total_display: String,
    pub cards: Vec<KanbanCard>,
}

/// Kanban board over the filtered leads, one column per board stage.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineBoardData {
    pub columns: Vec<KanbanColumn>,
}
