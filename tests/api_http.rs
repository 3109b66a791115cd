// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /scores   (defaults before any load cycle)
// - GET /insights (empty before any load cycle)
// - GET /signals  (scores + insights + bundle in one payload)

use std::sync::Arc;

use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use campaign_signal_analyzer::api::{self, AppState};
use campaign_signal_analyzer::feeds::config::FeedEndpoints;
use campaign_signal_analyzer::feeds::types::{FeedBundle, TrendKeyword};
use campaign_signal_analyzer::store::BundleSlot;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses, over a fresh slot.
fn test_router(slot: Arc<BundleSlot>) -> Router {
    api::router(AppState {
        slot,
        endpoints: FeedEndpoints::default(),
    })
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router(Arc::new(BundleSlot::new()));

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "ok", "health body should be 'ok'");
}

#[tokio::test]
async fn api_scores_answers_with_defaults_before_first_load() {
    let app = test_router(Arc::new(BundleSlot::new()));

    let req = Request::builder()
        .method("GET")
        .uri("/scores")
        .body(Body::empty())
        .expect("build GET /scores");

    let resp = app.oneshot(req).await.expect("oneshot /scores");
    assert!(resp.status().is_success());

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse scores json");

    assert_eq!(v["search"], 7.5);
    assert_eq!(v["trend"], 8.2);
    assert_eq!(v["intent"], 8.7);
    assert_eq!(v["engagement"], 7.8);
    assert_eq!(v["overall"], 8.1);
}

#[tokio::test]
async fn api_insights_is_an_empty_array_before_first_load() {
    let app = test_router(Arc::new(BundleSlot::new()));

    let req = Request::builder()
        .method("GET")
        .uri("/insights")
        .body(Body::empty())
        .expect("build GET /insights");

    let resp = app.oneshot(req).await.expect("oneshot /insights");
    assert!(resp.status().is_success());

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse insights json");
    assert_eq!(v, serde_json::json!([]));
}

#[tokio::test]
async fn api_signals_reflects_an_installed_bundle() {
    let slot = Arc::new(BundleSlot::new());
    slot.install(FeedBundle {
        search_trends: Some(vec![TrendKeyword {
            keyword: "Toyota RAV4 Hybrid".to_string(),
            average_interest: 90.0,
            growth_3m: Some("+23%".to_string()),
        }]),
        ..FeedBundle::empty()
    });

    let app = test_router(slot);

    let req = Request::builder()
        .method("GET")
        .uri("/signals")
        .body(Body::empty())
        .expect("build GET /signals");

    let resp = app.oneshot(req).await.expect("oneshot /signals");
    assert!(resp.status().is_success());

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse signals json");

    // Contract checks for UI consumers
    assert_eq!(v["scores"]["search"], 9.0);
    assert_eq!(v["scores"]["intent"], 8.7);
    assert!(v["insights"].is_array());
    assert_eq!(v["insights"][0]["source"], "Google Trends");
    assert_eq!(v["insights"][0]["priority"], "high");
    assert!(
        v["bundle"]["search_trends"].is_array(),
        "raw bundle must be exposed for detail rendering"
    );
    assert!(v["bundle"]["fetched_at"].is_string());
}
