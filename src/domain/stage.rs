//! Sales pipeline stages and the stage filter used by list views.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Position of a lead in the sales pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PipelineStage {
    New,
    Qualified,
    Proposal,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl PipelineStage {
    /// Every stage, in display order.
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::New,
        PipelineStage::Qualified,
        PipelineStage::Proposal,
        PipelineStage::Negotiation,
        PipelineStage::ClosedWon,
        PipelineStage::ClosedLost,
    ];

    /// Stages shown as kanban columns and dashboard bars. Excludes Closed Lost,
    /// which still appears in [`PipelineStage::ALL`].
    pub const KANBAN: [PipelineStage; 5] = [
        PipelineStage::New,
        PipelineStage::Qualified,
        PipelineStage::Proposal,
        PipelineStage::Negotiation,
        PipelineStage::ClosedWon,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PipelineStage::New => "New",
            PipelineStage::Qualified => "Qualified",
            PipelineStage::Proposal => "Proposal",
            PipelineStage::Negotiation => "Negotiation",
            PipelineStage::ClosedWon => "Closed Won",
            PipelineStage::ClosedLost => "Closed Lost",
        }
    }

    /// Hex colour used for stage badges and kanban headers.
    pub const fn color(self) -> &'static str {
        match self {
            PipelineStage::New => "#64748b",
            PipelineStage::Qualified => "#3b82f6",
            PipelineStage::Proposal => "#8b5cf6",
            PipelineStage::Negotiation => "#f59e0b",
            PipelineStage::ClosedWon => "#10b981",
            PipelineStage::ClosedLost => "#ef4444",
        }
    }

    /// Whether the stage still counts towards open pipeline value.
    pub const fn is_open(self) -> bool {
        !matches!(self, PipelineStage::ClosedWon | PipelineStage::ClosedLost)
    }

    /// Next stage in the forward progression.
    pub fn advance(self) -> Option<PipelineStage> {
        let index = self.walk_index()?;
        Self::KANBAN.get(index + 1).copied()
    }

    /// Previous stage in the forward progression.
    pub fn back(self) -> Option<PipelineStage> {
        let index = self.walk_index()?;
        index.checked_sub(1).map(|prev| Self::KANBAN[prev])
    }

    fn walk_index(self) -> Option<usize> {
        Self::KANBAN.iter().position(|stage| *stage == self)
    }
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineStage {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s.trim())
            .ok_or_else(|| TypeConstraintError::UnknownStage(s.to_string()))
    }
}

/// Stage selector for list views; `All` matches every lead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageFilter {
    #[default]
    All,
    Only(PipelineStage),
}

impl StageFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn matches(self, stage: PipelineStage) -> bool {
        match self {
            StageFilter::All => true,
            StageFilter::Only(expected) => expected == stage,
        }
    }

    /// Filter buttons offered by the leads table: `All` followed by every stage.
    pub fn options() -> Vec<StageFilter> {
        std::iter::once(StageFilter::All)
            .chain(PipelineStage::ALL.into_iter().map(StageFilter::Only))
            .collect()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StageFilter::All => Self::ALL_LABEL,
            StageFilter::Only(stage) => stage.as_str(),
        }
    }
}

impl Display for StageFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageFilter {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == Self::ALL_LABEL {
            Ok(StageFilter::All)
        } else {
            s.parse().map(StageFilter::Only)
        }
    }
}

impl From<PipelineStage> for StageFilter {
    fn from(stage: PipelineStage) -> Self {
        StageFilter::Only(stage)
    }
}
