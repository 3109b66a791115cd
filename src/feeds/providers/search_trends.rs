use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::feeds::types::{FeedProvider, TrendKeyword};

/// Wire shape of the search-trend document:
/// `{ "keywords": [ { "keyword", "average_interest", "growth_3m"? } ] }`
#[derive(Debug, Deserialize)]
struct SearchTrendsDoc {
    keywords: Vec<KeywordRow>,
}

#[derive(Debug, Deserialize)]
struct KeywordRow {
    keyword: String,
    #[serde(default)]
    average_interest: f64,
    growth_3m: Option<String>,
}

pub struct SearchTrendsProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl SearchTrendsProvider {
    /// Provider backed by a raw JSON payload; used by tests and offline runs.
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

    fn parse_doc(s: &str) -> Result<Vec<TrendKeyword>> {
        let t0 = std::time::Instant::now();
        let doc: SearchTrendsDoc =
            serde_json::from_str(s).context("parsing search-trend json")?;

        let out: Vec<TrendKeyword> = doc
            .keywords
            .into_iter()
            .filter(|row| !row.keyword.trim().is_empty())
            .map(|row| TrendKeyword {
                keyword: row.keyword,
                average_interest: row.average_interest,
                growth_3m: row.growth_3m,
            })
            .collect();

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("feed_parse_ms").record(ms);
        counter!("feed_documents_total", "feed" => "search_trends").increment(1);
        Ok(out)
    }
}

#[async_trait]
impl FeedProvider for SearchTrendsProvider {
    type Doc = Vec<TrendKeyword>;

    async fn fetch_latest(&self) -> Result<Vec<TrendKeyword>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_doc(s),
            Mode::Http { url, client } => {
                let body = client
                    .get(url)
                    .send()
                    .await
                    .context("search-trend http get()")?
                    .error_for_status()
                    .context("search-trend http status")?
                    .text()
                    .await
                    .context("search-trend http .text()")?;
                Self::parse_doc(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "search_trends"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_without_keyword_are_dropped() {
        let json = r#"{ "keywords": [
            { "keyword": "Toyota RAV4", "average_interest": 87, "growth_3m": "+23%" },
            { "keyword": "  ", "average_interest": 50 }
        ] }"#;
        let out = SearchTrendsProvider::parse_doc(json).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].keyword, "Toyota RAV4");
        assert_eq!(out[0].growth_3m.as_deref(), Some("+23%"));
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(SearchTrendsProvider::parse_doc("{ not json").is_err());
        assert!(SearchTrendsProvider::parse_doc(r#"{"other": []}"#).is_err());
    }
}
