// src/feeds/scheduler.rs
use std::sync::Arc;

use metrics::{counter, gauge};
use tokio::task::JoinHandle;

use crate::feeds::config::FeedEndpoints;
use crate::feeds::providers::{
    hashtag_trends::HashtagTrendsProvider, platform_topics::PlatformTopicsProvider,
    search_trends::SearchTrendsProvider,
};
use crate::feeds::types::{FeedProvider, HashtagTrend, PlatformTopic, TrendKeyword};
use crate::store::BundleSlot;

#[derive(Clone, Copy, Debug)]
pub struct RefreshCfg {
    pub interval_secs: u64,
}

/// Run one load cycle against arbitrary providers and install the result.
/// Returns whether the slot accepted the new bundle.
pub async fn refresh_once<S, H, T>(search: &S, hashtags: &H, topics: &T, slot: &BundleSlot) -> bool
where
    S: FeedProvider<Doc = Vec<TrendKeyword>>,
    H: FeedProvider<Doc = Vec<HashtagTrend>>,
    T: FeedProvider<Doc = Vec<PlatformTopic>>,
{
    let bundle = crate::feeds::load_bundle(search, hashtags, topics).await;
    let feeds_present = bundle.feeds_present();
    let installed = slot.install(bundle);

    counter!("refresh_runs_total").increment(1);
    gauge!("refresh_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);

    tracing::info!(
        target: "feeds",
        feeds_present,
        installed,
        "load cycle finished"
    );
    installed
}

/// One load cycle against the configured HTTP endpoints.
pub async fn refresh_from_endpoints(endpoints: &FeedEndpoints, slot: &BundleSlot) -> bool {
    let client = match endpoints.http_client() {
        Ok(c) => c,
        Err(e) => {
            // No client means no fetches at all; keep whatever is displayed.
            tracing::warn!(error = ?e, "feed http client unavailable, skipping cycle");
            return false;
        }
    };

    let search = SearchTrendsProvider::from_url(endpoints.search_url(), client.clone());
    let hashtags = HashtagTrendsProvider::from_url(endpoints.hashtags_url(), client.clone());
    let topics = PlatformTopicsProvider::from_url(endpoints.topics_url(), client);

    refresh_once(&search, &hashtags, &topics, slot).await
}

/// Spawn the background refresh loop. The first tick fires immediately so
/// the dashboard has data shortly after boot; later ticks follow the
/// configured interval (daily by default).
pub fn spawn_refresh(
    cfg: RefreshCfg,
    endpoints: FeedEndpoints,
    slot: Arc<BundleSlot>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(std::time::Duration::from_secs(cfg.interval_secs.max(1)));
        loop {
            ticker.tick().await;
            refresh_from_endpoints(&endpoints, &slot).await;
        }
    })
}
