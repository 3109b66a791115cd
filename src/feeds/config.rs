// src/feeds/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PATH: &str = "FEED_ENDPOINTS_PATH";

/// Fixed logical paths of the three feed documents, relative to `base_url`.
pub const SEARCH_TRENDS_PATH: &str = "/data/trends/latest.json";
pub const HASHTAG_TRENDS_PATH: &str = "/data/tiktok/latest.json";
pub const PLATFORM_TOPICS_PATH: &str = "/data/meta/latest.json";

/// Where the three feed documents live and how a load cycle is bounded.
///
/// Per-feed URLs override `base_url + fixed path` when set, so a single
/// relocated feed does not force a config rewrite for the other two.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedEndpoints {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub search_url: Option<String>,
    #[serde(default)]
    pub hashtags_url: Option<String>,
    #[serde(default)]
    pub topics_url: Option<String>,
    /// Per-fetch bound; a timed-out feed counts as a fetch failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Background refresh cadence. The dashboard data changes daily.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_refresh_interval_secs() -> u64 {
    86_400
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_url: None,
            hashtags_url: None,
            topics_url: None,
            timeout_secs: default_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl FeedEndpoints {
    pub fn search_url(&self) -> String {
        self.search_url
            .clone()
            .unwrap_or_else(|| format!("{}{}", self.base_url, SEARCH_TRENDS_PATH))
    }

    pub fn hashtags_url(&self) -> String {
        self.hashtags_url
            .clone()
            .unwrap_or_else(|| format!("{}{}", self.base_url, HASHTAG_TRENDS_PATH))
    }

    pub fn topics_url(&self) -> String {
        self.topics_url
            .clone()
            .unwrap_or_else(|| format!("{}{}", self.base_url, PLATFORM_TOPICS_PATH))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP client shared by the three providers for one load cycle.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout())
            .build()
            .context("building feed http client")
    }
}

/// Load endpoints from an explicit path. Supports TOML or JSON formats.
pub fn load_endpoints_from(path: &Path) -> Result<FeedEndpoints> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed endpoints from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_endpoints(&content, ext.as_str())
}

/// Load endpoints using env var + fallbacks:
/// 1) $FEED_ENDPOINTS_PATH
/// 2) config/feed_endpoints.toml
/// 3) config/feed_endpoints.json
/// 4) built-in defaults
pub fn load_endpoints_default() -> Result<FeedEndpoints> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_endpoints_from(&pb);
        } else {
            return Err(anyhow!("FEED_ENDPOINTS_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feed_endpoints.toml");
    if toml_p.exists() {
        return load_endpoints_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feed_endpoints.json");
    if json_p.exists() {
        return load_endpoints_from(&json_p);
    }
    Ok(FeedEndpoints::default())
}

fn parse_endpoints(s: &str, hint_ext: &str) -> Result<FeedEndpoints> {
    if hint_ext == "json" {
        return serde_json::from_str(s).context("parsing feed endpoints json");
    }
    if let Ok(v) = toml::from_str::<FeedEndpoints>(s) {
        return Ok(v);
    }
    serde_json::from_str(s).context("unsupported feed endpoints format")
}
