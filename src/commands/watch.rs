use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;

use crate::config::{Config, Target};
use crate::notify::{DiscordWebhook, Notifier, StdoutNotifier};
use crate::source::HttpSource;
use crate::watcher::Watcher;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Config file (defaults to .mercwatch.toml in the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Deliver to the development webhook instead of production
    #[arg(long)]
    pub dev: bool,
    /// Print notifications to stdout instead of posting them
    #[arg(long, conflicts_with = "dev")]
    pub dry_run: bool,
    /// Seconds between poll starts (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
    /// Stop after this many cycles (default: run until interrupted)
    #[arg(long)]
    pub max_cycles: Option<u64>,
}

impl WatchArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let cwd = std::env::current_dir().context("determining working directory")?;
        let config = Config::resolve(self.config.as_deref(), &cwd)?;

        let interval = self
            .interval
            .map_or_else(|| config.poll_interval(), Duration::from_secs);
        let target = if self.dev {
            Target::Development
        } else {
            Target::Production
        };
        let webhook_url = if self.dry_run {
            None
        } else {
            Some(config.webhook_url(target)?)
        };
        let source = HttpSource::new(&config.source.url, config.http_timeout());

        let _ = ctrlc::set_handler(|| {
            tracing::info!("interrupted, shutting down");
            std::process::exit(0);
        });

        tracing::info!(
            url = %config.source.url,
            data_centre = %config.source.data_centre,
            interval_secs = interval.as_secs(),
            dev = self.dev,
            dry_run = self.dry_run,
            "watching listings"
        );

        match webhook_url {
            Some(url) => {
                let webhook = DiscordWebhook::new(url, config.http_timeout());
                run(source, webhook, &config, interval, self.max_cycles);
            }
            None => run(source, StdoutNotifier, &config, interval, self.max_cycles),
        }

        Ok(())
    }
}

fn run<N: Notifier>(
    source: HttpSource,
    notifier: N,
    config: &Config,
    interval: Duration,
    max_cycles: Option<u64>,
) {
    let mut watcher = Watcher::new(source, notifier, &config.source.data_centre);
    watcher.run(interval, max_cycles);
}
