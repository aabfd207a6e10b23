use crate::infra::AppState;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use recruit_finder::error::AppError;
use recruit_finder::recruit::{FilterResult, Recommendations, RecruitEngine, Selection, Tier};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct FilterRequest {
    #[serde(default)]
    pub(crate) tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FilterResponse {
    pub(crate) selection: Selection,
    pub(crate) total: usize,
    pub(crate) combinations: FilterResult,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecommendationsQuery {
    #[serde(default)]
    pub(crate) tier: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tier: Option<Tier>,
    pub(crate) roster_size: usize,
    pub(crate) total: usize,
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) combinations: Recommendations,
}

/// Engine endpoints plus health, readiness and metrics.
pub(crate) fn with_recruit_routes(engine: Arc<RecruitEngine>) -> Router {
    Router::new()
        .route("/api/v1/recruit/filter", post(filter_endpoint))
        .route(
            "/api/v1/recruit/recommendations",
            get(recommendations_endpoint),
        )
        .with_state(engine)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn filter_endpoint(
    State(engine): State<Arc<RecruitEngine>>,
    Json(payload): Json<FilterRequest>,
) -> Result<Json<FilterResponse>, AppError> {
    let selection = engine.parse_selection(payload.tags.as_slice())?;
    let result = engine.filter(&selection);

    Ok(Json(FilterResponse {
        selection,
        total: result.len(),
        combinations: (*result).clone(),
    }))
}

pub(crate) async fn recommendations_endpoint(
    State(engine): State<Arc<RecruitEngine>>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let tier = query
        .tier
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(str::parse::<Tier>)
        .transpose()?;

    let recommendations = engine.recommendations();
    let combinations = match tier {
        Some(tier) => recommendations.only(tier),
        None => (*recommendations).clone(),
    };

    Ok(Json(RecommendationsResponse {
        tier,
        roster_size: engine.roster().len(),
        total: combinations.len(),
        generated_at: engine.recommendations_generated_at(),
        combinations,
    }))
}
