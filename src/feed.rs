// Local repository feed: loading, change detection, and rendering.
//
// The feed is a JSON document with two optional categories:
//
//   { "featured": [Entry], "interesting": [Entry] }
//
// where Entry = {name, url, description?, tags?, highlight?}.

use crate::view::{description_or_placeholder, Container, HeadingKind, Node};
use anyhow::{Context, Result};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

pub const FEATURED_HEADING: &str = "Featured Projects:";
pub const INTERESTING_HEADING: &str = "Other Interesting Projects:";
pub const NO_PROJECTS: &str = "No projects configured. Edit repos.json to add some.";
pub const LOAD_FAILED: &str = "Failed to load projects. Check repos.json";

/// Anything that can produce the raw feed document.
pub trait FeedSource {
    fn fetch_feed(&self) -> Result<serde_json::Value>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalRepo {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub highlight: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalFeed {
    #[serde(default)]
    pub featured: Option<Vec<LocalRepo>>,
    #[serde(default)]
    pub interesting: Option<Vec<LocalRepo>>,
}

impl LocalFeed {
    fn categories(&self) -> [(HeadingKind, &str, &[LocalRepo]); 2] {
        [
            (
                HeadingKind::Featured,
                FEATURED_HEADING,
                self.featured.as_deref().unwrap_or_default(),
            ),
            (
                HeadingKind::Interesting,
                INTERESTING_HEADING,
                self.interesting.as_deref().unwrap_or_default(),
            ),
        ]
    }
}

/// Build the node list for a feed: a heading plus items for each non-empty
/// category, `featured` first.
pub fn render_feed(feed: &LocalFeed) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (kind, heading, repos) in feed.categories() {
        if repos.is_empty() {
            continue;
        }
        nodes.push(Node::Heading {
            kind,
            text: heading.to_string(),
        });
        nodes.extend(repos.iter().map(repo_node));
    }
    if nodes.is_empty() {
        nodes.push(Node::Paragraph(NO_PROJECTS.to_string()));
    }
    nodes
}

fn repo_node(repo: &LocalRepo) -> Node {
    Node::RepoItem {
        name: repo.name.clone(),
        url: repo.url.clone(),
        description: description_or_placeholder(repo.description.as_deref()),
        tags: repo.tags.clone().unwrap_or_default(),
        highlight: repo.highlight.unwrap_or(false),
    }
}

/// What a single `load` did to the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered,
    Unchanged,
    Failed,
}

/// Owns the feed container and the serialized form of the payload that is
/// currently on screen.
pub struct FeedPoller<F: FeedSource> {
    source: F,
    container: Container,
    last_rendered: Option<String>,
}

impl<F: FeedSource> FeedPoller<F> {
    pub fn new(source: F) -> Self {
        FeedPoller {
            source,
            container: Container::new(),
            last_rendered: None,
        }
    }

    /// Fetch the feed and re-render only if the payload changed.
    ///
    /// A failure replaces the container with an error message and forgets
    /// the cached payload, so the next successful poll renders again even if
    /// the data is identical to what was shown before the failure.
    pub fn load(&mut self) -> LoadOutcome {
        match self.fetch() {
            Ok((serialized, feed)) => {
                if self.last_rendered.as_deref() == Some(serialized.as_str()) {
                    debug!("event=feed_poll status=unchanged");
                    return LoadOutcome::Unchanged;
                }
                self.container.replace(render_feed(&feed));
                self.last_rendered = Some(serialized);
                info!("event=feed_render status=ok");
                LoadOutcome::Rendered
            }
            Err(e) => {
                error!("event=feed_load status=error error={e:#}");
                self.container.replace(vec![Node::Error(LOAD_FAILED.to_string())]);
                self.last_rendered = None;
                LoadOutcome::Failed
            }
        }
    }

    fn fetch(&self) -> Result<(String, LocalFeed)> {
        let value = self.source.fetch_feed()?;
        let serialized = serde_json::to_string(&value)?;
        let feed = serde_json::from_value(value).context("Unexpected feed shape")?;
        Ok((serialized, feed))
    }

    pub fn container(&self) -> &Container {
        &self.container
    }
}
