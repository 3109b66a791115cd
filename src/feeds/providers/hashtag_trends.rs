use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::{Deserialize, Deserializer};

use crate::feeds::types::{FeedProvider, HashtagTrend};

/// Wire shape of the short-video trend document:
/// `{ "trends": { "hashtags": [ { "hashtag", "views", "relevanceScore", "posts"? } ] } }`
#[derive(Debug, Deserialize)]
struct HashtagTrendsDoc {
    trends: TrendsBlock,
}

#[derive(Debug, Deserialize)]
struct TrendsBlock {
    hashtags: Vec<HashtagRow>,
}

#[derive(Debug, Deserialize)]
struct HashtagRow {
    hashtag: String,
    /// Upstream sends either a display string ("2M") or a bare number.
    #[serde(default, deserialize_with = "views_as_string")]
    views: String,
    #[serde(rename = "relevanceScore", default)]
    relevance_score: f64,
    posts: Option<u64>,
}

fn views_as_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Views {
        Text(String),
        Count(u64),
    }
    Ok(match Views::deserialize(de)? {
        Views::Text(s) => s,
        Views::Count(n) => n.to_string(),
    })
}

pub struct HashtagTrendsProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl HashtagTrendsProvider {
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    pub fn from_url(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            mode: Mode::Http {
                url: url.into(),
                client,
            },
        }
    }

    fn parse_doc(s: &str) -> Result<Vec<HashtagTrend>> {
        let t0 = std::time::Instant::now();
        let doc: HashtagTrendsDoc =
            serde_json::from_str(s).context("parsing hashtag-trend json")?;

        let out: Vec<HashtagTrend> = doc
            .trends
            .hashtags
            .into_iter()
            .filter(|row| !row.hashtag.trim().is_empty())
            .map(|row| HashtagTrend {
                hashtag: row.hashtag,
                views: row.views,
                relevance_score: row.relevance_score,
                posts: row.posts,
            })
            .collect();

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("feed_parse_ms").record(ms);
        counter!("feed_documents_total", "feed" => "social_hashtags").increment(1);
        Ok(out)
    }
}

#[async_trait]
impl FeedProvider for HashtagTrendsProvider {
    type Doc = Vec<HashtagTrend>;

    async fn fetch_latest(&self) -> Result<Vec<HashtagTrend>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_doc(s),
            Mode::Http { url, client } => {
                let body = client
                    .get(url)
                    .send()
                    .await
                    .context("hashtag-trend http get()")?
                    .error_for_status()
                    .context("hashtag-trend http status")?
                    .text()
                    .await
                    .context("hashtag-trend http .text()")?;
                Self::parse_doc(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "social_hashtags"
    }
}
