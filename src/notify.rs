//! Where rendered notifications go.

use std::time::Duration;

use crate::error::NotifyError;

/// Longest message a Discord webhook accepts, in characters.
pub const DISCORD_CONTENT_LIMIT: usize = 2000;

/// Accepts one pre-rendered message. Delivery is fire-and-forget.
pub trait Notifier {
    fn send(&self, message: &str) -> anyhow::Result<()>;
}

/// Posts messages to a Discord webhook.
pub struct DiscordWebhook {
    url: String,
    agent: ureq::Agent,
}

impl DiscordWebhook {
    pub fn new(url: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            url: url.to_string(),
            agent,
        }
    }
}

impl Notifier for DiscordWebhook {
    fn send(&self, message: &str) -> anyhow::Result<()> {
        let content = truncate_chars(message, DISCORD_CONTENT_LIMIT);
        let body = serde_json::json!({ "content": content });
        self.agent
            .post(self.url.as_str())
            .send_json(&body)
            .map_err(|e| NotifyError(e.to_string()))?;
        Ok(())
    }
}

/// Prints messages to stdout instead of delivering them.
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn send(&self, message: &str) -> anyhow::Result<()> {
        println!("{message}\n");
        Ok(())
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
