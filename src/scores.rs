//! # Score Calculator
//! Pure, testable logic that maps a `FeedBundle` → `ScoreSet`.
//! No I/O; a feed that failed to load simply leaves its default in place.
//!
//! The four signals are normalized to a 0-10 scale with one decimal:
//! - `search`     : mean keyword interest / 10, default 7.5
//! - `trend`      : mean hashtag relevance / 10, default 8.2
//! - `intent`     : fixed 8.7 (no source feed contributes)
//! - `engagement` : mean topic engagement (already 0-10), default 7.8
//! - `overall`    : arithmetic mean of the four

use serde::{Deserialize, Serialize};

use crate::feeds::types::{active, FeedBundle};

/// Fallback values used when a feed is absent or empty. Centralized so the
/// fallback policy is auditable and testable on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreDefaults {
    pub search: f64,
    pub trend: f64,
    pub intent: f64,
    pub engagement: f64,
}

pub const DEFAULT_SCORES: ScoreDefaults = ScoreDefaults {
    search: 7.5,
    trend: 8.2,
    intent: 8.7,
    engagement: 7.8,
};

/// The four normalized signals plus their mean, each at one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub search: f64,
    pub trend: f64,
    pub intent: f64,
    pub engagement: f64,
    pub overall: f64,
}

/// Compute scores for a bundle against the standard defaults table.
pub fn compute_scores(bundle: &FeedBundle) -> ScoreSet {
    compute_scores_with(bundle, &DEFAULT_SCORES)
}

/// Same transform with an explicit defaults table.
pub fn compute_scores_with(bundle: &FeedBundle, defaults: &ScoreDefaults) -> ScoreSet {
    let search = active(&bundle.search_trends)
        .map(|kws| round1(mean(kws.iter().map(|k| k.average_interest)) / 10.0))
        .unwrap_or(defaults.search);

    let trend = active(&bundle.social_hashtags)
        .map(|tags| round1(mean(tags.iter().map(|t| t.relevance_score)) / 10.0))
        .unwrap_or(defaults.trend);

    // Purchase intent has no live feed behind it; the table value stands.
    let intent = defaults.intent;

    let engagement = active(&bundle.platform_topics)
        .map(|topics| round1(mean(topics.iter().map(|t| t.engagement_score))))
        .unwrap_or(defaults.engagement);

    // Average in integer tenths: each component is already one-decimal, so a
    // half-tenth mean (e.g. 8.05 from the all-defaults case) stays exact and
    // rounds the same way every run instead of drifting on float error.
    let sum_tenths: f64 = [search, trend, intent, engagement]
        .iter()
        .map(|s| (s * 10.0).round())
        .sum();
    let overall = (sum_tenths / 4.0).round() / 10.0;

    ScoreSet {
        search,
        trend,
        intent,
        engagement,
        overall,
    }
}

/// Unweighted arithmetic mean. Callers guarantee a non-empty iterator via
/// `active()`, so the zero-denominator case cannot be reached.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    sum / n.max(1) as f64
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
