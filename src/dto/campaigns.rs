use serde::Serialize;

use crate::domain::campaign::Campaign;
use crate::domain::email_template::EmailTemplate;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CampaignRow {
    pub campaign: Campaign,
    pub open_rate: u32,
}

impl From<Campaign> for CampaignRow {
    fn from(campaign: Campaign) -> Self {
        Self {
            open_rate: campaign.open_rate(),
            campaign,
        }
    }
}

/// Data required to render the email campaigns page.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignsPageData {
    pub campaigns: Vec<CampaignRow>,
    pub templates: Vec<EmailTemplate>,
}
