use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ExitError;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_TOML: &str = ".mercwatch.toml";

pub const ENV_WEBHOOK_URL: &str = "MERCWATCH_WEBHOOK_URL";
pub const ENV_WEBHOOK_URL_DEV: &str = "MERCWATCH_WEBHOOK_URL_DEV";

/// Runtime settings. Every key is optional and defaults to the values the
/// watcher has always used.
///
/// Classification rules are deliberately absent: they are fixed policy in
/// [`crate::listing::classify`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default = "default_data_centre", alias = "dataCentre")]
    pub data_centre: String,
    #[serde(default = "default_timeout_secs", alias = "timeoutSecs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            data_centre: default_data_centre(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval_secs", alias = "intervalSecs")]
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default, alias = "webhookUrl")]
    pub webhook_url: Option<String>,
    #[serde(default, alias = "devWebhookUrl")]
    pub dev_webhook_url: Option<String>,
}

/// Which of the two webhook endpoints to deliver to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Production,
    Development,
}

// Default value functions for serde
fn default_source_url() -> String { "https://xivpf.com/listings".into() }
fn default_data_centre() -> String { "Light".into() }
fn default_timeout_secs() -> u64 { 15 }
fn default_interval_secs() -> u64 { 30 }

impl Config {
    /// Load config from an explicit path, or from `.mercwatch.toml` in `dir`
    /// if it exists, or fall back to defaults. Webhook environment variables
    /// are applied on top.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match find_config(dir) {
                Some(path) => Self::load(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse_toml(&contents)
    }

    /// Parse config from a TOML string.
    pub fn parse_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| ExitError::Config(format!("invalid {CONFIG_TOML}: {e}")).into())
    }

    /// Override webhook URLs from the environment. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_WEBHOOK_URL).filter(|v| !v.is_empty()) {
            self.notify.webhook_url = Some(url);
        }
        if let Some(url) = lookup(ENV_WEBHOOK_URL_DEV).filter(|v| !v.is_empty()) {
            self.notify.dev_webhook_url = Some(url);
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.source.data_centre.trim().is_empty() {
            return Err(ExitError::Config("source.data_centre must not be empty".into()).into());
        }
        if self.source.timeout_secs == 0 {
            return Err(ExitError::Config("source.timeout_secs must be positive".into()).into());
        }
        if self.poll.interval_secs == 0 {
            return Err(ExitError::Config("poll.interval_secs must be positive".into()).into());
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs)
    }

    /// Webhook URL for `target`, or a config error naming how to set it.
    pub fn webhook_url(&self, target: Target) -> anyhow::Result<&str> {
        let (url, key, env) = match target {
            Target::Production => (&self.notify.webhook_url, "notify.webhook_url", ENV_WEBHOOK_URL),
            Target::Development => (
                &self.notify.dev_webhook_url,
                "notify.dev_webhook_url",
                ENV_WEBHOOK_URL_DEV,
            ),
        };
        url.as_deref().ok_or_else(|| {
            ExitError::Config(format!("no webhook configured: set {key} or {env}")).into()
        })
    }
}

/// Find the config file in `dir`, if present.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_TOML);
    path.exists().then_some(path)
}
