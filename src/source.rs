//! Where the listings page comes from.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::error::ExitError;

/// Produces the raw markup of the listings page.
pub trait PageSource {
    fn fetch(&self) -> anyhow::Result<String>;
}

/// Blocking HTTP GET against the live listings page.
pub struct HttpSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpSource {
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

impl PageSource for HttpSource {
    fn fetch(&self) -> anyhow::Result<String> {
        let fetch_err = |e: ureq::Error| ExitError::Fetch {
            url: self.url.clone(),
            message: e.to_string(),
        };
        let body = self
            .agent
            .get(self.url.as_str())
            .call()
            .map_err(fetch_err)?
            .into_body()
            .read_to_string()
            .map_err(fetch_err)?;
        Ok(body)
    }
}

/// Reads a saved copy of the listings page from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FileSource {
    fn fetch(&self) -> anyhow::Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))
    }
}
