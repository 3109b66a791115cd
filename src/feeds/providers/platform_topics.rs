use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::feeds::types::{FeedProvider, PlatformTopic, Sentiment};

/// Wire shape of the social-platform topic document:
/// `{ "aggregatedTopics": [ { "topic", "engagement_score", "mentions"?, "sentiment"? } ] }`
#[derive(Debug, Deserialize)]
struct PlatformTopicsDoc {
    #[serde(rename = "aggregatedTopics")]
    aggregated_topics: Vec<TopicRow>,
}

#[derive(Debug, Deserialize)]
struct TopicRow {
    topic: String,
    #[serde(default)]
    engagement_score: f64,
    mentions: Option<u64>,
    sentiment: Option<Sentiment>,
}

pub struct PlatformTopicsProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl PlatformTopicsProvider {
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

    fn parse_doc(s: &str) -> Result<Vec<PlatformTopic>> {
        let t0 = std::time::Instant::now();
        let doc: PlatformTopicsDoc =
            serde_json::from_str(s).context("parsing platform-topic json")?;

        let out: Vec<PlatformTopic> = doc
            .aggregated_topics
            .into_iter()
            .filter(|row| !row.topic.trim().is_empty())
            .map(|row| PlatformTopic {
                topic: row.topic,
                engagement_score: row.engagement_score,
                mentions: row.mentions,
                sentiment: row.sentiment,
            })
            .collect();

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("feed_parse_ms").record(ms);
        counter!("feed_documents_total", "feed" => "platform_topics").increment(1);
        Ok(out)
    }
}

#[async_trait]
impl FeedProvider for PlatformTopicsProvider {
    type Doc = Vec<PlatformTopic>;

    async fn fetch_latest(&self) -> Result<Vec<PlatformTopic>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_doc(s),
            Mode::Http { url, client } => {
                let body = client
                    .get(url)
                    .send()
                    .await
                    .context("platform-topic http get()")?
                    .error_for_status()
                    .context("platform-topic http status")?
                    .text()
                    .await
                    .context("platform-topic http .text()")?;
                Self::parse_doc(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "platform_topics"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_and_optionals_parse() {
        let json = r#"{ "aggregatedTopics": [
            { "topic": "Hybrid SUVs", "engagement_score": 8.9, "mentions": 15400, "sentiment": "very_positive" },
            { "topic": "Fuel savings", "engagement_score": 7.4 }
        ] }"#;
        let out = PlatformTopicsProvider::parse_doc(json).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].sentiment, Some(Sentiment::VeryPositive));
        assert_eq!(out[1].mentions, None);
        assert_eq!(out[1].sentiment, None);
    }

    #[test]
    fn empty_topic_list_is_ok_not_an_error() {
        let out = PlatformTopicsProvider::parse_doc(r#"{ "aggregatedTopics": [] }"#).unwrap();
        assert!(out.is_empty());
    }
}
