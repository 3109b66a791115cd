//! # Insight Ranker
//! Pure logic that maps a `FeedBundle` → an ordered list of recommendations,
//! one per feed that is present and non-empty. Each insight cites the feed's
//! top item verbatim so the dashboard can show the evidence behind the call.
//!
//! Order is fixed: search feed, then hashtag feed, then topic feed. Ties on
//! the ranking metric go to the first item in the list, so the output is
//! reproducible for identical input.

use serde::{Deserialize, Serialize};

use crate::feeds::types::{active, FeedBundle};

pub const SEARCH_SOURCE: &str = "Google Trends";
pub const HASHTAG_SOURCE: &str = "TikTok Creative Center";
pub const TOPIC_SOURCE: &str = "Meta Platforms";

const SEARCH_ACTION: &str = "Increase investment in Google Search Ads";
const HASHTAG_ACTION: &str = "Create themed video content using this hashtag";
const TOPIC_ACTION: &str = "Expand hybrid content on Facebook and Instagram";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// One ranked, human-readable recommendation derived from a single feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub source: String,
    pub headline: String,
    pub action: String,
    pub priority: Priority,
}

/// Emit up to three insights in source order. Absent or empty feeds are the
/// only suppression condition; no numeric threshold gates emission.
pub fn rank_insights(bundle: &FeedBundle) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(3);

    if let Some(top) = active(&bundle.search_trends)
        .and_then(|kws| top_by(kws, |k| k.average_interest))
    {
        insights.push(Insight {
            source: SEARCH_SOURCE.to_string(),
            headline: format!(
                "\"{}\" leads automotive searches with {}/100 interest",
                top.keyword,
                fmt_metric(top.average_interest)
            ),
            action: SEARCH_ACTION.to_string(),
            priority: Priority::High,
        });
    }

    if let Some(top) = active(&bundle.social_hashtags)
        .and_then(|tags| top_by(tags, |t| t.relevance_score))
    {
        insights.push(Insight {
            source: HASHTAG_SOURCE.to_string(),
            headline: format!(
                "{} reached {} views in automotive content",
                top.hashtag, top.views
            ),
            action: HASHTAG_ACTION.to_string(),
            priority: Priority::Medium,
        });
    }

    if let Some(top) = active(&bundle.platform_topics)
        .and_then(|topics| top_by(topics, |t| t.engagement_score))
    {
        insights.push(Insight {
            source: TOPIC_SOURCE.to_string(),
            headline: format!(
                "\"{}\" generates {}/10 engagement",
                top.topic,
                fmt_metric(top.engagement_score)
            ),
            action: TOPIC_ACTION.to_string(),
            priority: Priority::High,
        });
    }

    insights
}

/// Maximum by metric; replaces only on a strictly greater value, so the
/// first occurrence wins a tie.
fn top_by<T>(items: &[T], metric: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let m = metric(item);
        if best.map_or(true, |(_, bm)| m > bm) {
            best = Some((item, m));
        }
    }
    best.map(|(item, _)| item)
}

/// Metric values embed verbatim: integers print without a trailing `.0`.
fn fmt_metric(x: f64) -> String {
    if x.fract() == 0.0 {
        format!("{}", x as i64)
    } else {
        x.to_string()
    }
}
