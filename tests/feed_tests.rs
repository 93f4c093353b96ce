use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use termfolio::api::ApiClient;
use termfolio::config::Config;
use termfolio::feed::{FeedPoller, FeedSource, LoadOutcome, LOAD_FAILED, NO_PROJECTS};
use termfolio::view::Node;

/// Serves queued payloads in order; `None` simulates a failed request.
struct Scripted {
    responses: RefCell<VecDeque<Option<Value>>>,
}

impl Scripted {
    fn new(responses: Vec<Option<Value>>) -> Self {
        Scripted {
            responses: RefCell::new(responses.into()),
        }
    }
}

impl FeedSource for Scripted {
    fn fetch_feed(&self) -> anyhow::Result<Value> {
        match self.responses.borrow_mut().pop_front() {
            Some(Some(value)) => Ok(value),
            _ => anyhow::bail!("Failed to load repos: 404 Not Found"),
        }
    }
}

fn sample() -> Value {
    json!({
        "featured": [{"name": "termfolio", "url": "https://github.com/jpdck/termfolio", "highlight": true}],
        "interesting": [{"name": "dotfiles", "url": "https://github.com/jpdck/dotfiles", "tags": ["nix"]}]
    })
}

#[test]
fn identical_payload_does_not_touch_the_container() {
    let mut poller = FeedPoller::new(Scripted::new(vec![Some(sample()), Some(sample())]));

    assert_eq!(poller.load(), LoadOutcome::Rendered);
    let mutations = poller.container().mutations();
    let nodes = poller.container().nodes().to_vec();

    assert_eq!(poller.load(), LoadOutcome::Unchanged);
    assert_eq!(poller.container().mutations(), mutations);
    assert_eq!(poller.container().nodes(), nodes.as_slice());
}

#[test]
fn changed_payload_rerenders() {
    let mut changed = sample();
    changed["featured"][0]["description"] = json!("now with words");
    let mut poller = FeedPoller::new(Scripted::new(vec![Some(sample()), Some(changed)]));

    poller.load();
    assert_eq!(poller.load(), LoadOutcome::Rendered);
    assert_eq!(poller.container().mutations(), 2);
    assert!(matches!(
        &poller.container().nodes()[1],
        Node::RepoItem { description, .. } if description == "now with words"
    ));
}

#[test]
fn failure_shows_message_and_next_tick_recovers() {
    let mut poller = FeedPoller::new(Scripted::new(vec![Some(sample()), None, Some(sample())]));

    assert_eq!(poller.load(), LoadOutcome::Rendered);
    assert_eq!(poller.load(), LoadOutcome::Failed);
    assert_eq!(
        poller.container().nodes(),
        &[Node::Error(LOAD_FAILED.to_string())]
    );

    // Same data as before the failure still has to replace the error.
    assert_eq!(poller.load(), LoadOutcome::Rendered);
    assert_eq!(poller.container().nodes().len(), 4);
}

#[test]
fn wrong_shape_is_a_load_failure() {
    let mut poller = FeedPoller::new(Scripted::new(vec![Some(json!({"featured": "nope"}))]));
    assert_eq!(poller.load(), LoadOutcome::Failed);
}

#[test]
fn empty_feed_renders_exactly_one_paragraph() {
    let mut poller = FeedPoller::new(Scripted::new(vec![Some(json!({}))]));
    poller.load();
    assert_eq!(
        poller.container().nodes(),
        &[Node::Paragraph(NO_PROJECTS.to_string())]
    );
    assert_eq!(
        poller.container().to_html(),
        format!("<p>{NO_PROJECTS}</p>")
    );
}

#[test]
fn demo_feed_loads_through_a_file_path() {
    let demo = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/repos.json");
    let config = Config::from_lookup(|key| match key {
        "TERMFOLIO_FEED" => Some(demo.to_string()),
        _ => None,
    });
    assert!(!config.watch);

    let mut poller = FeedPoller::new(ApiClient::new(&config).unwrap());
    assert_eq!(poller.load(), LoadOutcome::Rendered);

    let nodes = poller.container().nodes();
    assert_eq!(nodes.len(), 4);
    assert!(matches!(
        &nodes[1],
        Node::RepoItem { name, highlight: true, .. } if name == "termfolio"
    ));
    assert!(matches!(
        &nodes[3],
        Node::RepoItem { description, tags, .. }
            if description == "No description provided." && tags == &["nix", "k3s"]
    ));
    assert_eq!(poller.load(), LoadOutcome::Unchanged);
}
