// src/core/net.rs
use std::{fs, path::PathBuf, time::Duration};

use reqwest::blocking::Client;

use crate::config::consts::{BASE_URL, FETCH_TIMEOUT_SECS, USER_AGENT};
use crate::config::options::topic_url;
use crate::error::{Error, Result};

/// Anything that can hand back the rendered markup of a topic page.
pub trait PageSource {
    fn fetch(&self, topic: &str) -> Result<String>;
}

/// Plain HTTP GET of `BASE_URL + topic`.
pub struct HttpSource {
    client: Client,
    base: String,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        Self::with_base(BASE_URL)
    }

    pub fn with_base(base: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self { client, base: s!(base) })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, topic: &str) -> Result<String> {
        let url = topic_url(&self.base, topic);
        logf!("Fetching {url}");

        let resp = self.client.get(&url).send()
            .map_err(|e| Error::Fetch(format!("{url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP {status} for {url}")));
        }
        let body = resp.text().map_err(|e| Error::Fetch(format!("{url}: {e}")))?;
        logd!("Fetched {} bytes", body.len());
        Ok(body)
    }
}

/// Markup saved to disk earlier. The topic is ignored.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FileSource {
    fn fetch(&self, _topic: &str) -> Result<String> {
        logf!("Reading markup from {}", self.path.display());
        fs::read_to_string(&self.path)
            .map_err(|e| Error::Fetch(format!("{}: {e}", self.path.display())))
    }
}
