//! Configuration model loaded from external sources.

use serde::Deserialize;

/// Settings shared by the dashboard session and the text renderer.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Substituted for `{sender}` in email templates.
    pub sender_name: String,
    /// Name used in the dashboard greeting.
    pub operator_greeting: String,
    pub notification_ttl_ms: u64,
    /// Delay between pressing send and the draft reporting success.
    pub send_delay_ms: u64,
    /// Delay between success and the composer closing itself.
    pub close_delay_ms: u64,
    pub initial_sent_count: u32,
    pub templates_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sender_name: "Alex Martinez".to_string(),
            operator_greeting: "Alex".to_string(),
            notification_ttl_ms: 3000,
            send_delay_ms: 1500,
            close_delay_ms: 1500,
            initial_sent_count: 12,
            templates_dir: "templates/**/*".to_string(),
        }
    }
}
