// src/feeds/mod.rs
pub mod config;
pub mod providers;
pub mod scheduler;
pub mod types;

use chrono::Utc;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;

use crate::feeds::types::{FeedBundle, FeedProvider, HashtagTrend, PlatformTopic, TrendKeyword};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "feed_documents_total",
            "Feed documents parsed, labeled by feed."
        );
        describe_counter!(
            "feed_fetch_errors_total",
            "Feed fetch/parse errors, labeled by feed."
        );
        describe_histogram!("feed_parse_ms", "Feed document parse time in milliseconds.");
        describe_counter!("refresh_runs_total", "Completed load cycles.");
        describe_gauge!("refresh_last_run_ts", "Unix ts of the last load cycle.");
        describe_gauge!(
            "bundle_feeds_present",
            "Feeds present in the most recent bundle (0-3)."
        );
    });
}

/// Settle a single fetch: a failed feed degrades to `None` instead of
/// propagating, so one bad source never aborts the cycle.
async fn settle<P: FeedProvider>(provider: &P) -> Option<P::Doc> {
    match provider.fetch_latest().await {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(error = ?e, feed = provider.name(), "feed fetch failed");
            counter!("feed_fetch_errors_total", "feed" => provider.name()).increment(1);
            None
        }
    }
}

/// Run one load cycle: fan the three fetches out concurrently, wait for all
/// of them to settle, and merge whatever survived into a fresh bundle.
///
/// This never fails as a whole; total failure yields a bundle with every
/// feed absent. Retry is the caller's concern (periodic re-invocation).
pub async fn load_bundle<S, H, T>(search: &S, hashtags: &H, topics: &T) -> FeedBundle
where
    S: FeedProvider<Doc = Vec<TrendKeyword>>,
    H: FeedProvider<Doc = Vec<HashtagTrend>>,
    T: FeedProvider<Doc = Vec<PlatformTopic>>,
{
    ensure_metrics_described();

    let (search_trends, social_hashtags, platform_topics) =
        tokio::join!(settle(search), settle(hashtags), settle(topics));

    let bundle = FeedBundle {
        search_trends,
        social_hashtags,
        platform_topics,
        fetched_at: Utc::now(),
    };

    gauge!("bundle_feeds_present").set(bundle.feeds_present() as f64);
    bundle
}
