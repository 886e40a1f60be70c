//! Built-in sample data the dashboard session starts from.

use chrono::NaiveDate;

use crate::domain::activity::{Activity, ActivityKind};
use crate::domain::campaign::{Campaign, CampaignStatus};
use crate::domain::lead::Lead;
use crate::domain::stage::PipelineStage;
use crate::domain::types::{CompanyName, DealValue, LeadEmail, LeadId, LeadName};

struct SampleLead {
    id: i64,
    name: &'static str,
    company: &'static str,
    email: &'static str,
    phone: &'static str,
    value: f64,
    stage: PipelineStage,
    source: &'static str,
    assigned: &'static str,
    last_contact: (i32, u32, u32),
    tags: &'static [&'static str],
}

const SAMPLE_LEADS: [SampleLead; 8] = [
    SampleLead {
        id: 1,
        name: "Sarah Chen",
        company: "Nexus Corp",
        email: "sarah@nexus.com",
        phone: "+1 555-0101",
        value: 48000.0,
        stage: PipelineStage::Qualified,
        source: "LinkedIn",
        assigned: "Alex M.",
        last_contact: (2026, 2, 18),
        tags: &["Enterprise", "Hot"],
    },
    SampleLead {
        id: 2,
        name: "Marcus Webb",
        company: "Orbit SaaS",
        email: "m.webb@orbit.io",
        phone: "+1 555-0142",
        value: 22500.0,
        stage: PipelineStage::Proposal,
        source: "Referral",
        assigned: "Jamie L.",
        last_contact: (2026, 2, 19),
        tags: &["Mid-Market"],
    },
    SampleLead {
        id: 3,
        name: "Priya Nair",
        company: "Stellar AI",
        email: "priya@stellar.ai",
        phone: "+1 555-0198",
        value: 97000.0,
        stage: PipelineStage::Negotiation,
        source: "Website",
        assigned: "Alex M.",
        last_contact: (2026, 2, 17),
        tags: &["Enterprise", "AI"],
    },
    SampleLead {
        id: 4,
        name: "James Okafor",
        company: "BrightEdge",
        email: "j.okafor@brightedge.com",
        phone: "+1 555-0234",
        value: 15000.0,
        stage: PipelineStage::New,
        source: "Cold Email",
        assigned: "Sam K.",
        last_contact: (2026, 2, 20),
        tags: &["SMB"],
    },
    SampleLead {
        id: 5,
        name: "Lena Müller",
        company: "DataStream GmbH",
        email: "lena@datastream.de",
        phone: "+49 555-0177",
        value: 63000.0,
        stage: PipelineStage::Qualified,
        source: "Conference",
        assigned: "Jamie L.",
        last_contact: (2026, 2, 15),
        tags: &["Enterprise", "EU"],
    },
    SampleLead {
        id: 6,
        name: "Carlos Rivera",
        company: "PulseMedia",
        email: "carlos@pulsemedia.com",
        phone: "+1 555-0299",
        value: 8500.0,
        stage: PipelineStage::ClosedWon,
        source: "Referral",
        assigned: "Sam K.",
        last_contact: (2026, 2, 10),
        tags: &["SMB"],
    },
    SampleLead {
        id: 7,
        name: "Aisha Patel",
        company: "QuantumLeap",
        email: "a.patel@qleap.com",
        phone: "+1 555-0311",
        value: 155000.0,
        stage: PipelineStage::Negotiation,
        source: "LinkedIn",
        assigned: "Alex M.",
        last_contact: (2026, 2, 19),
        tags: &["Enterprise", "Hot", "Priority"],
    },
    SampleLead {
        id: 8,
        name: "Tom Bergmann",
        company: "FlowStack",
        email: "t.berg@flowstack.dev",
        phone: "+1 555-0388",
        value: 31000.0,
        stage: PipelineStage::Proposal,
        source: "Website",
        assigned: "Sam K.",
        last_contact: (2026, 2, 16),
        tags: &["Tech", "Mid-Market"],
    },
];

impl SampleLead {
    fn to_lead(&self) -> Option<Lead> {
        let name = LeadName::new(self.name).ok()?;
        let (year, month, day) = self.last_contact;
        Some(Lead {
            id: LeadId::new(self.id).ok()?,
            initials: name.initials(),
            name,
            company: CompanyName::new(self.company).ok()?,
            email: LeadEmail::new(self.email).ok()?,
            phone: self.phone.to_string(),
            value: DealValue::new(self.value).ok()?,
            stage: self.stage,
            source: self.source.to_string(),
            assigned: self.assigned.to_string(),
            last_contact: NaiveDate::from_ymd_opt(year, month, day)?,
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
        })
    }
}

/// The eight sample leads, in their initial display order.
pub fn sample_leads() -> Vec<Lead> {
    SAMPLE_LEADS.iter().filter_map(SampleLead::to_lead).collect()
}

/// Static recent-activity feed shown on the dashboard.
pub fn recent_activities() -> Vec<Activity> {
    vec![
        Activity::new(1, ActivityKind::Email, "Sarah Chen", "Sent initial proposal", "2 hours ago"),
        Activity::new(2, ActivityKind::Call, "Aisha Patel", "Discovery call completed", "3 hours ago"),
        Activity::new(3, ActivityKind::Stage, "Marcus Webb", "Moved to Proposal stage", "5 hours ago"),
        Activity::new(4, ActivityKind::Note, "Priya Nair", "Added negotiation notes", "Yesterday"),
        Activity::new(5, ActivityKind::Won, "Carlos Rivera", "Deal closed – $8,500", "2 days ago"),
    ]
}

/// Static campaign summaries shown on the campaigns page.
pub fn campaigns() -> Vec<Campaign> {
    vec![
        Campaign::new("Q1 Outreach", 47, 31, 18, CampaignStatus::Active),
        Campaign::new("Enterprise Nurture", 23, 19, 14, CampaignStatus::Active),
        Campaign::new("Re-engagement", 34, 12, 5, CampaignStatus::Paused),
    ]
}
