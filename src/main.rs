//! Campaign Signal Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the bundle slot, the background feed
//! refresh, and the Prometheus endpoint.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use campaign_signal_analyzer::api::{self, AppState};
use campaign_signal_analyzer::feeds::config::load_endpoints_default;
use campaign_signal_analyzer::feeds::scheduler::{spawn_refresh, RefreshCfg};
use campaign_signal_analyzer::metrics::Metrics;
use campaign_signal_analyzer::store::BundleSlot;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - SIGNALS_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("SIGNALS_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feeds=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments. This enables
    // FEED_ENDPOINTS_PATH / SIGNALS_DEV_LOG from .env.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let endpoints = load_endpoints_default().unwrap_or_else(|e| {
        tracing::warn!(error = ?e, "feed endpoint config unreadable, using defaults");
        Default::default()
    });

    let metrics = Metrics::init(endpoints.refresh_interval_secs);

    let slot = Arc::new(BundleSlot::new());
    // Detached on purpose; the task lives for the whole process.
    let _refresh = spawn_refresh(
        RefreshCfg {
            interval_secs: endpoints.refresh_interval_secs,
        },
        endpoints.clone(),
        slot.clone(),
    );

    let state = AppState { slot, endpoints };
    let router = api::router(state).merge(metrics.router());

    Ok(router.into())
}
