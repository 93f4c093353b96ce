// Runtime configuration. Every knob is read from an environment variable
// with a sensible default, the same way `ApiClient::from_env` does it.

use log::warn;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_FEED: &str = "http://localhost:8000/repos.json";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_USER: &str = "jpdck";
pub const DEFAULT_POLL_MS: u64 = 2000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Everything the binary needs to know before it draws the first menu.
#[derive(Debug, Clone)]
pub struct Config {
    /// Local feed location: an http(s) URL or a filesystem path.
    pub feed: String,
    pub api_url: String,
    pub github_user: String,
    /// Re-fetch the local feed on `poll_interval` while the projects view is open.
    pub watch: bool,
    pub poll_interval: Duration,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Config {
    /// Build the configuration from `TERMFOLIO_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but with an injectable variable lookup, so tests
    /// don't have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let feed = lookup("TERMFOLIO_FEED").unwrap_or_else(|| DEFAULT_FEED.into());
        let api_url = lookup("TERMFOLIO_API_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        let github_user =
            lookup("TERMFOLIO_GITHUB_USER").unwrap_or_else(|| DEFAULT_GITHUB_USER.into());

        let watch = match lookup("TERMFOLIO_WATCH") {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                warn!("event=config_invalid key=TERMFOLIO_WATCH value={raw:?}");
                is_loopback_feed(&feed)
            }),
            None => is_loopback_feed(&feed),
        };

        let poll_ms = match lookup("TERMFOLIO_POLL_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    warn!("event=config_invalid key=TERMFOLIO_POLL_MS value={raw:?}");
                    DEFAULT_POLL_MS
                }
            },
            None => DEFAULT_POLL_MS,
        };

        let log_level = lookup("TERMFOLIO_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into());
        let log_dir = lookup("TERMFOLIO_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        Config {
            feed,
            api_url,
            github_user,
            watch,
            poll_interval: Duration::from_millis(poll_ms),
            log_level,
            log_dir,
        }
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("termfolio")
        .join("logs")
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Watch mode is a development convenience: it defaults to on only when the
/// feed is served from this machine.
pub fn is_loopback_feed(feed: &str) -> bool {
    let Ok(url) = Url::parse(feed) else {
        return false;
    };
    matches!(
        url.host_str(),
        Some("localhost") | Some("127.0.0.1") | Some("[::1]") | Some("::1")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_watch_the_local_dev_server() {
        let cfg = config_with(&[]);
        assert_eq!(cfg.feed, DEFAULT_FEED);
        assert_eq!(cfg.github_user, "jpdck");
        assert!(cfg.watch);
        assert_eq!(cfg.poll_interval, Duration::from_millis(2000));
    }

    #[test]
    fn remote_feed_disables_watch_unless_forced() {
        let cfg = config_with(&[("TERMFOLIO_FEED", "https://example.org/repos.json")]);
        assert!(!cfg.watch);

        let cfg = config_with(&[
            ("TERMFOLIO_FEED", "https://example.org/repos.json"),
            ("TERMFOLIO_WATCH", "yes"),
        ]);
        assert!(cfg.watch);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config_with(&[("TERMFOLIO_POLL_MS", "soon"), ("TERMFOLIO_WATCH", "maybe")]);
        assert_eq!(cfg.poll_interval, Duration::from_millis(DEFAULT_POLL_MS));
        assert!(cfg.watch);
    }

    #[test]
    fn api_url_trailing_slash_is_dropped() {
        let cfg = config_with(&[("TERMFOLIO_API_URL", "http://127.0.0.1:9000/")]);
        assert_eq!(cfg.api_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn loopback_detection() {
        assert!(is_loopback_feed("http://127.0.0.1:8000/repos.json"));
        assert!(is_loopback_feed("http://[::1]/repos.json"));
        assert!(!is_loopback_feed("repos.json"));
        assert!(!is_loopback_feed("https://jpdck.github.io/repos.json"));
    }
}
