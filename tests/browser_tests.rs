use termfolio::browser::{
    BrowserStatus, LanguageFilter, RemoteRepo, RepoBrowser, RepoSource, FETCH_FAILED, NO_MATCHES,
};
use termfolio::view::Node;

struct Fixed(Vec<RemoteRepo>);

impl RepoSource for Fixed {
    fn fetch_repos(&self) -> anyhow::Result<Vec<RemoteRepo>> {
        Ok(self.0.clone())
    }
}

struct NotFound;

impl RepoSource for NotFound {
    fn fetch_repos(&self) -> anyhow::Result<Vec<RemoteRepo>> {
        anyhow::bail!("Repository listing failed: 404 Not Found")
    }
}

fn repo(
    name: &str,
    description: Option<&str>,
    language: Option<&str>,
    updated: &str,
) -> RemoteRepo {
    RemoteRepo {
        name: name.into(),
        html_url: format!("https://github.com/jpdck/{name}"),
        description: description.map(str::to_string),
        language: language.map(str::to_string),
        stargazers_count: 5,
        watchers_count: 2,
        updated_at: updated.parse().unwrap(),
    }
}

fn loaded() -> RepoBrowser<Fixed> {
    let mut browser = RepoBrowser::new(Fixed(vec![
        repo("old-rust", Some("Parser experiments"), Some("Rust"), "2022-01-01T00:00:00Z"),
        repo("site", None, Some("JavaScript"), "2025-06-01T00:00:00Z"),
        repo("notes", Some("Markdown notes"), None, "2024-01-01T00:00:00Z"),
        repo("termfolio", Some("Terminal portfolio"), Some("Rust"), "2025-09-01T00:00:00Z"),
        repo("blank-lang", None, Some(""), "2023-01-01T00:00:00Z"),
    ]));
    assert_eq!(browser.load(), BrowserStatus::Ready);
    browser
}

fn names(browser: &RepoBrowser<Fixed>) -> Vec<&str> {
    browser.visible().iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn sorted_newest_first() {
    let browser = loaded();
    let order: Vec<&str> = browser.repos().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["termfolio", "site", "notes", "blank-lang", "old-rust"]);
}

#[test]
fn filter_controls_are_unique_and_skip_missing_languages() {
    let browser = loaded();
    let labels: Vec<String> = browser
        .filter_controls()
        .iter()
        .map(|c| c.filter.label().to_string())
        .collect();
    assert_eq!(labels, vec!["all", "Rust", "JavaScript"]);

    let active: Vec<_> = browser.filter_controls().into_iter().filter(|c| c.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].filter, LanguageFilter::All);
}

#[test]
fn language_then_search_narrows_the_list() {
    let mut browser = loaded();
    browser.select_language(LanguageFilter::Only("Rust".into()));
    assert_eq!(names(&browser), vec!["termfolio", "old-rust"]);

    browser.set_query("  PARSER ");
    assert_eq!(names(&browser), vec!["old-rust"]);
    assert_eq!(browser.language(), &LanguageFilter::Only("Rust".into()));
    assert_eq!(browser.container().nodes().len(), 1);
}

#[test]
fn selecting_a_language_resets_the_search() {
    let mut browser = loaded();
    browser.set_query("notes");
    assert_eq!(names(&browser), vec!["notes"]);

    browser.select_language(LanguageFilter::All);
    assert_eq!(browser.query(), "");
    assert_eq!(names(&browser).len(), 5);
}

#[test]
fn empty_result_renders_message_not_failure() {
    let mut browser = loaded();
    browser.select_language(LanguageFilter::Only("JavaScript".into()));
    browser.set_query("rust");
    assert_eq!(
        browser.container().nodes(),
        &[Node::Paragraph(NO_MATCHES.to_string())]
    );
    assert_eq!(browser.filter_controls().len(), 3);
}

#[test]
fn cards_carry_placeholder_language_and_counts() {
    let mut browser = loaded();
    browser.set_query("site");
    assert_eq!(
        browser.container().nodes(),
        &[Node::Card {
            name: "site".into(),
            url: "https://github.com/jpdck/site".into(),
            description: "No description provided.".into(),
            language: Some("JavaScript".into()),
            stars: 5,
            watchers: 2,
        }]
    );
}

#[test]
fn failed_fetch_replaces_container_and_builds_no_controls() {
    let mut browser = RepoBrowser::new(NotFound);
    assert_eq!(browser.load(), BrowserStatus::Failed);
    assert_eq!(
        browser.container().nodes(),
        &[Node::Error(FETCH_FAILED.to_string())]
    );
    assert!(browser.filter_controls().is_empty());
    assert!(browser.languages().is_empty());

    // Interaction after a failure leaves the message alone.
    browser.set_query("x");
    assert_eq!(browser.container().mutations(), 1);
}
