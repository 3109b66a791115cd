use std::sync::Arc;

use chrono::{DateTime, Utc};
use shuttle_axum::axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::feeds::config::FeedEndpoints;
use crate::feeds::scheduler::refresh_from_endpoints;
use crate::feeds::types::FeedBundle;
use crate::insights::{rank_insights, Insight};
use crate::scores::{compute_scores, ScoreSet};
use crate::store::BundleSlot;

#[derive(Clone)]
pub struct AppState {
    pub slot: Arc<BundleSlot>,
    pub endpoints: FeedEndpoints,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/signals", get(signals))
        .route("/scores", get(scores))
        .route("/insights", get(insights))
        .route("/refresh", post(refresh))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Everything the dashboard needs in one round trip: the derived scores and
/// insights plus the raw bundle for detail rendering.
#[derive(serde::Serialize)]
struct SignalsResp {
    scores: ScoreSet,
    insights: Vec<Insight>,
    bundle: Option<FeedBundle>,
}

#[derive(serde::Serialize)]
struct RefreshResp {
    installed: bool,
    feeds_present: usize,
    fetched_at: Option<DateTime<Utc>>,
}

/// Current bundle, or an all-absent stand-in before the first load cycle so
/// consumers always see a valid ScoreSet.
fn current_or_empty(state: &AppState) -> FeedBundle {
    state
        .slot
        .current()
        .map(|b| (*b).clone())
        .unwrap_or_else(FeedBundle::empty)
}

async fn signals(State(state): State<AppState>) -> Json<SignalsResp> {
    let bundle = current_or_empty(&state);
    Json(SignalsResp {
        scores: compute_scores(&bundle),
        insights: rank_insights(&bundle),
        bundle: state.slot.current().map(|b| (*b).clone()),
    })
}

async fn scores(State(state): State<AppState>) -> Json<ScoreSet> {
    let bundle = current_or_empty(&state);
    Json(compute_scores(&bundle))
}

async fn insights(State(state): State<AppState>) -> Json<Vec<Insight>> {
    let bundle = current_or_empty(&state);
    Json(rank_insights(&bundle))
}

/// Manual refresh trigger (the dashboard's "refresh now" button). Runs one
/// load cycle inline; total feed failure still answers 200 with the slot
/// left as it was.
async fn refresh(State(state): State<AppState>) -> Json<RefreshResp> {
    let installed = refresh_from_endpoints(&state.endpoints, &state.slot).await;
    let current = state.slot.current();
    Json(RefreshResp {
        installed,
        feeds_present: current.as_ref().map_or(0, |b| b.feeds_present()),
        fetched_at: current.map(|b| b.fetched_at),
    })
}
