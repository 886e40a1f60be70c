//! Email campaign summaries shown on the campaigns page.

use std::fmt::{Display, Formatter};

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CampaignStatus {
    Active,
    Paused,
}

impl Display for CampaignStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Active => write!(f, "Active"),
            CampaignStatus::Paused => write!(f, "Paused"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Campaign {
    pub name: String,
    pub sent: u32,
    pub opened: u32,
    pub clicked: u32,
    pub status: CampaignStatus,
}

impl Campaign {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        sent: u32,
        opened: u32,
        clicked: u32,
        status: CampaignStatus,
    ) -> Self {
        Self {
            name: name.into(),
            sent,
            opened,
            clicked,
            status,
        }
    }

    /// Opened share of sent emails as a whole percentage; 0 when nothing was sent.
    pub fn open_rate(&self) -> u32 {
        if self.sent == 0 {
            return 0;
        }
        (f64::from(self.opened) / f64::from(self.sent) * 100.0).round() as u32
    }
}
