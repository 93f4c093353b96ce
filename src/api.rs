// HTTP client: a small blocking client for the two feeds the portfolio
// reads. Both fetches are plain GETs; anything other than a success status
// is turned into an error for the caller to render.

use crate::browser::{RemoteRepo, RepoSource};
use crate::config::Config;
use crate::feed::FeedSource;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::path::Path;

/// Holds the reqwest blocking client plus the two endpoints it talks to.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    feed: String,
    api_url: String,
    github_user: String,
}

impl ApiClient {
    /// Create a client for the locations in `config`. GitHub rejects
    /// requests without a user agent, so one is always sent.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("termfolio/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            feed: config.feed.clone(),
            api_url: config.api_url.clone(),
            github_user: config.github_user.clone(),
        })
    }

    /// URL of the repository listing for the configured account.
    pub fn repos_url(&self) -> String {
        format!("{}/users/{}/repos", self.api_url, self.github_user)
    }

    fn feed_is_remote(&self) -> bool {
        self.feed.starts_with("http://") || self.feed.starts_with("https://")
    }

    fn fetch_remote_feed(&self) -> Result<serde_json::Value> {
        // Cache buster so dev servers and proxies never hand back a stale copy.
        let stamp = chrono::Utc::now().timestamp_millis();
        let res = self
            .client
            .get(&self.feed)
            .query(&[("t", stamp.to_string())])
            .send()
            .context("Failed to send feed request")?;
        if !res.status().is_success() {
            anyhow::bail!("Failed to load repos: {}", res.status());
        }
        let value = res.json().context("Parsing feed json")?;
        Ok(value)
    }

    fn read_feed_file(&self) -> Result<serde_json::Value> {
        let path = Path::new(&self.feed);
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read feed {}", path.display()))?;
        let value = serde_json::from_str(&data).context("Parsing feed json")?;
        Ok(value)
    }
}

impl FeedSource for ApiClient {
    fn fetch_feed(&self) -> Result<serde_json::Value> {
        if self.feed_is_remote() {
            self.fetch_remote_feed()
        } else {
            self.read_feed_file()
        }
    }
}

impl RepoSource for ApiClient {
    fn fetch_repos(&self) -> Result<Vec<RemoteRepo>> {
        let res = self
            .client
            .get(self.repos_url())
            .query(&[("per_page", "100")])
            .send()
            .context("Failed to send repository listing request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_default();
            anyhow::bail!("Repository listing failed: {} - {}", status, txt);
        }
        let repos: Vec<RemoteRepo> = res.json().context("Parsing repository listing json")?;
        Ok(repos)
    }
}
