use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::listing::Listing;
use crate::page;
use crate::source::{FileSource, HttpSource, PageSource};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Config file (defaults to .mercwatch.toml in the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Read the listings page from a file instead of fetching it
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Include listings that fail classification
    #[arg(long)]
    pub all: bool,
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A listing together with its classification, for `--format json`.
#[derive(Debug, Serialize)]
pub struct ListingReport<'a> {
    #[serde(flatten)]
    pub listing: &'a Listing,
    pub seconds_since_update: u64,
    pub is_merc_run: bool,
    pub is_allowed_duty: bool,
    pub is_valid: bool,
}

impl<'a> ListingReport<'a> {
    pub fn new(listing: &'a Listing) -> Self {
        Self {
            listing,
            seconds_since_update: listing.seconds_since_update(),
            is_merc_run: listing.is_merc_run(),
            is_allowed_duty: listing.is_allowed_duty(),
            is_valid: listing.is_valid(),
        }
    }
}

impl CheckArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let cwd = std::env::current_dir().context("determining working directory")?;
        let config = Config::resolve(self.config.as_deref(), &cwd)?;

        let markup = match &self.file {
            Some(path) => FileSource::new(path).fetch()?,
            None => HttpSource::new(&config.source.url, config.http_timeout()).fetch()?,
        };

        let parsed = page::parse_page(&markup, &config.source.data_centre)?;
        let shown: Vec<&Listing> = parsed
            .listings
            .iter()
            .filter(|listing| self.all || listing.is_valid())
            .collect();

        match self.format {
            OutputFormat::Json => {
                let reports: Vec<ListingReport<'_>> =
                    shown.iter().map(|listing| ListingReport::new(listing)).collect();
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }
            OutputFormat::Text => print!("{}", render_text(&shown, Utc::now())),
        }

        tracing::info!(
            parsed = parsed.listings.len(),
            rejected = parsed.rejected.len(),
            shown = shown.len(),
            "check complete"
        );
        Ok(())
    }
}

fn render_text(listings: &[&Listing], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for listing in listings {
        let reasons = rejection_reasons(listing);
        if !reasons.is_empty() {
            out.push_str(&format!("[skipped: {}]\n", reasons.join(", ")));
        }
        out.push_str(&listing.render(now));
        out.push_str("\n\n");
    }
    out
}

fn rejection_reasons(listing: &Listing) -> Vec<&'static str> {
    let mut reasons = Vec::new();
    if !listing.is_merc_run() {
        reasons.push("not a merc run");
    }
    if !listing.is_allowed_duty() {
        reasons.push("duty not allowed");
    }
    reasons
}
