// Live repository browser.
//
// Fetches the account's public repositories once, then filters them by
// language and free-text search entirely in memory.

use crate::view::{description_or_placeholder, Container, Node};
use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};

pub const FETCH_FAILED: &str = "Failed to load repositories. Please try again later.";
pub const NO_MATCHES: &str = "No repositories match your filter.";
pub const ALL_LABEL: &str = "all";

/// Anything that can list the account's repositories.
pub trait RepoSource {
    fn fetch_repos(&self) -> Result<Vec<RemoteRepo>>;
}

/// The subset of a GitHub repository object the browser reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRepo {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    pub updated_at: DateTime<Utc>,
}

impl RemoteRepo {
    /// Language, treating an empty string as absent.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty())
    }

    fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(query)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(query))
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    All,
    Only(String),
}

impl LanguageFilter {
    fn admits(&self, repo: &RemoteRepo) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Only(lang) => repo.language() == Some(lang.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LanguageFilter::All => ALL_LABEL,
            LanguageFilter::Only(lang) => lang,
        }
    }
}

/// One language button. `active` is computed from the browser state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    pub filter: LanguageFilter,
    pub active: bool,
}

/// Where the browser is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStatus {
    NotLoaded,
    Ready,
    Failed,
}

pub struct RepoBrowser<S: RepoSource> {
    source: S,
    repos: Vec<RemoteRepo>,
    languages: Vec<String>,
    language: LanguageFilter,
    query: String,
    status: BrowserStatus,
    container: Container,
}

impl<S: RepoSource> RepoBrowser<S> {
    pub fn new(source: S) -> Self {
        RepoBrowser {
            source,
            repos: Vec::new(),
            languages: Vec::new(),
            language: LanguageFilter::All,
            query: String::new(),
            status: BrowserStatus::NotLoaded,
            container: Container::new(),
        }
    }

    /// Fetch once. A failure replaces the container and is final for this
    /// browser: no retry, no filter controls.
    pub fn load(&mut self) -> BrowserStatus {
        match self.source.fetch_repos() {
            Ok(mut repos) => {
                repos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                self.languages = distinct_languages(&repos);
                info!(
                    "event=repos_loaded count={} languages={}",
                    repos.len(),
                    self.languages.len()
                );
                self.repos = repos;
                self.status = BrowserStatus::Ready;
                self.render();
            }
            Err(e) => {
                error!("event=repos_load status=error error={e:#}");
                self.container.replace(vec![Node::Error(FETCH_FAILED.to_string())]);
                self.status = BrowserStatus::Failed;
            }
        }
        self.status
    }

    /// Switch language. The search box is reset as part of the switch.
    pub fn select_language(&mut self, filter: LanguageFilter) {
        self.language = filter;
        self.query.clear();
        self.render();
    }

    /// Update the search text; the language filter is left alone.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.render();
    }

    /// `all` first, then one control per distinct language. Empty until a
    /// successful load.
    pub fn filter_controls(&self) -> Vec<FilterControl> {
        if self.status != BrowserStatus::Ready {
            return Vec::new();
        }
        std::iter::once(LanguageFilter::All)
            .chain(self.languages.iter().cloned().map(LanguageFilter::Only))
            .map(|filter| FilterControl {
                active: filter == self.language,
                filter,
            })
            .collect()
    }

    /// Entries passing both the language filter and the search text.
    pub fn visible(&self) -> Vec<&RemoteRepo> {
        let query = self.query.trim().to_lowercase();
        self.repos
            .iter()
            .filter(|r| self.language.admits(r) && r.matches_query(&query))
            .collect()
    }

    fn render(&mut self) {
        if self.status != BrowserStatus::Ready {
            return;
        }
        let nodes: Vec<Node> = self.visible().into_iter().map(card).collect();
        if nodes.is_empty() {
            self.container.replace(vec![Node::Paragraph(NO_MATCHES.to_string())]);
        } else {
            self.container.replace(nodes);
        }
    }

    pub fn repos(&self) -> &[RemoteRepo] {
        &self.repos
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn language(&self) -> &LanguageFilter {
        &self.language
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> BrowserStatus {
        self.status
    }

    pub fn container(&self) -> &Container {
        &self.container
    }
}

/// Distinct non-empty languages in first-seen order.
pub fn distinct_languages(repos: &[RemoteRepo]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for lang in repos.iter().filter_map(RemoteRepo::language) {
        if !seen.iter().any(|s| s == lang) {
            seen.push(lang.to_string());
        }
    }
    seen
}

fn card(repo: &RemoteRepo) -> Node {
    Node::Card {
        name: repo.name.clone(),
        url: repo.html_url.clone(),
        description: description_or_placeholder(repo.description.as_deref()),
        language: repo.language().map(str::to_string),
        stars: repo.stargazers_count,
        watchers: repo.watchers_count,
    }
}
