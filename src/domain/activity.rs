use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Kind of event shown in the recent-activity feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ActivityKind {
    Email,
    Call,
    Stage,
    Note,
    Won,
}

impl ActivityKind {
    pub const fn icon(self) -> &'static str {
        match self {
            ActivityKind::Email => "✉",
            ActivityKind::Call => "📞",
            ActivityKind::Stage => "🔄",
            ActivityKind::Note => "📝",
            ActivityKind::Won => "🎉",
        }
    }
}

impl Display for ActivityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActivityKind::Email => "email",
            ActivityKind::Call => "call",
            ActivityKind::Stage => "stage",
            ActivityKind::Note => "note",
            ActivityKind::Won => "won",
        };
        f.write_str(label)
    }
}

/// A single entry of the recent-activity feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub id: i32,
    pub kind: ActivityKind,
    pub lead: String,
    pub text: String,
    /// Human-readable relative time, e.g. "2 hours ago".
    pub time: String,
}

impl Activity {
    #[must_use]
    pub fn new(
        id: i32,
        kind: ActivityKind,
        lead: impl Into<String>,
        text: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            lead: lead.into(),
            text: text.into(),
            time: time.into(),
        }
    }
}
