// src/feeds/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One keyword row from the search-trend feed. Interest is on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendKeyword {
    pub keyword: String,
    pub average_interest: f64,
    /// Preformatted 3-month growth label, e.g. "+23%".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_3m: Option<String>,
}

/// One hashtag row from the short-video trend feed. Relevance is 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagTrend {
    pub hashtag: String,
    /// Display string as delivered upstream ("2M", "860K"). Numeric payloads
    /// are coerced to their decimal form at the parse boundary.
    pub views: String,
    pub relevance_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<u64>,
}

/// One topic row from the social-platform feed. Engagement is already 0-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformTopic {
    pub topic: String,
    pub engagement_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

/// Coarse sentiment label attached to a platform topic.
/// Upstream documents spell the first variant both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    #[serde(alias = "very positive")]
    VeryPositive,
    Positive,
    Neutral,
    Negative,
}

/// Result of one load cycle across all three feeds.
///
/// Each list is independently optional: `Some` iff that feed's fetch and
/// parse succeeded. A bundle is immutable once produced; a new cycle builds
/// a whole new bundle rather than patching fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedBundle {
    pub search_trends: Option<Vec<TrendKeyword>>,
    pub social_hashtags: Option<Vec<HashtagTrend>>,
    pub platform_topics: Option<Vec<PlatformTopic>>,
    pub fetched_at: DateTime<Utc>,
}

impl FeedBundle {
    /// Bundle with every feed absent, stamped `fetched_at` now.
    pub fn empty() -> Self {
        Self {
            search_trends: None,
            social_hashtags: None,
            platform_topics: None,
            fetched_at: Utc::now(),
        }
    }

    /// Number of feeds that loaded (0..=3). Counts empty lists as present;
    /// scoring and ranking apply their own non-empty rule.
    pub fn feeds_present(&self) -> usize {
        [
            self.search_trends.is_some(),
            self.social_hashtags.is_some(),
            self.platform_topics.is_some(),
        ]
        .iter()
        .filter(|p| **p)
        .count()
    }

    /// True when all three feeds are absent (total load failure).
    pub fn is_empty(&self) -> bool {
        self.feeds_present() == 0
    }
}

/// Present-and-non-empty view of an optional feed list.
///
/// Scoring and insight ranking treat an empty list exactly like an absent
/// feed, so all fallback branching funnels through this one helper.
pub fn active<T>(feed: &Option<Vec<T>>) -> Option<&[T]> {
    match feed {
        Some(v) if !v.is_empty() => Some(v.as_slice()),
        _ => None,
    }
}

/// One upstream feed source. `Doc` is the typed document the provider parses
/// out of the raw payload; implementations must not panic on malformed input.
#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    type Doc: Send;

    async fn fetch_latest(&self) -> Result<Self::Doc>;
    fn name(&self) -> &'static str;
}
