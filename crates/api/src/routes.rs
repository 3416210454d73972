use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use engine::{ActionKind, Awarder, FeedOrder};
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec};
use serde::Deserialize;
use serde_json::json;
use store::{MemeFilter, Stores, UserStatsRow};
use tracing::instrument;

use crate::dto::{
    AwardResponse, BadgeDto, FeedMemeDto, LeaderboardEntryDto, UserStatsDto, UserSummaryDto,
};
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct ApiState {
    pub stores: Arc<dyn Stores>,
    pub awarder: Arc<Awarder>,
    pub metrics_path: &'static str,
    pub default_feed_limit: usize,
    pub max_feed_limit: usize,
}

pub fn build_router(state: Arc<ApiState>) -> Router {
    let metrics_path: &'static str = state.metrics_path;
    Router::new()
        .route("/healthz", get(healthz))
        .route("/users/:id/progression", get(get_progression))
        .route("/users/:id/badges", get(get_badges))
        .route("/users/:id/achievements", get(get_achievements))
        .route("/users/:id/summary", get(get_summary))
        .route("/feed", get(get_feed))
        .route("/leaderboard", get(get_leaderboard))
        .route("/awards", post(post_award))
        .route(metrics_path, get(metrics))
        .with_state(state)
}

static AWARDS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "engine_awards_total",
        "Point awards processed, by action kind and outcome",
        &["action", "outcome"]
    )
    .expect("awards counter")
});

static FEED_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "feed_requests_total",
        "Feed requests served, by ordering",
        &["order"]
    )
    .expect("feed counter")
});

async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn fetch_stats(state: &ApiState, user_id: i64) -> ApiResult<UserStatsRow> {
    state
        .stores
        .stats()
        .fetch(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("user {} not found", user_id)))
}

#[instrument(skip(state))]
async fn get_progression(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<engine::ProgressionSummary>> {
    let stats = fetch_stats(&state, user_id).await?;
    Ok(Json(engine::compute_progression(&stats)?))
}

#[instrument(skip(state))]
async fn get_badges(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<BadgeDto>>> {
    let stats = fetch_stats(&state, user_id).await?;
    let badges = engine::compute_badges(&stats)?;
    Ok(Json(badges.into_iter().map(BadgeDto::from).collect()))
}

#[instrument(skip(state))]
async fn get_achievements(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<engine::AchievementProgress>>> {
    let stats = fetch_stats(&state, user_id).await?;
    Ok(Json(engine::compute_achievements(&stats)?))
}

#[instrument(skip(state))]
async fn get_summary(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserSummaryDto>> {
    let stats = fetch_stats(&state, user_id).await?;
    let progression = engine::compute_progression(&stats)?;
    let badges = engine::compute_badges(&stats)?;
    let achievements = engine::compute_achievements(&stats)?;
    let completion_rate = engine::completion_rate(&stats);
    Ok(Json(UserSummaryDto {
        progression,
        badges_count: badges.len(),
        badges: badges.into_iter().map(BadgeDto::from).collect(),
        completion_rate,
        achievements,
        stats: UserStatsDto::from(stats),
    }))
}

#[derive(Debug, Deserialize)]
struct FeedQuery {
    order: Option<String>,
    seed: Option<u64>,
    owner: Option<i64>,
    limit: Option<usize>,
}

fn parse_order(value: Option<&str>, seed: Option<u64>) -> ApiResult<FeedOrder> {
    match value.unwrap_or("latest") {
        "latest" => Ok(FeedOrder::Latest),
        "most_liked" => Ok(FeedOrder::MostLiked),
        "trending" => Ok(FeedOrder::Trending),
        "random" => {
            let seed = seed.ok_or_else(|| {
                ApiError::bad_request("order=random requires an explicit seed parameter")
            })?;
            Ok(FeedOrder::Random { seed })
        }
        other => Err(ApiError::bad_request(format!(
            "invalid feed order: {}",
            other
        ))),
    }
}

#[instrument(skip(state))]
async fn get_feed(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<Vec<FeedMemeDto>>> {
    let order = parse_order(query.order.as_deref(), query.seed)?;
    FEED_REQUESTS_TOTAL
        .with_label_values(&[order.as_str()])
        .inc();

    // max(1) keeps the clamp bounds ordered even if feed.max_limit is
    // misconfigured below 1.
    let max_limit = state.max_feed_limit.max(1);
    let limit = query
        .limit
        .unwrap_or(state.default_feed_limit)
        .clamp(1, max_limit);
    let filter = MemeFilter {
        owner: query.owner,
        limit: None,
    };
    let memes = state.stores.content().list_memes(filter).await?;

    // Trending needs the companion comment counts; the other orders
    // never read them.
    let mut comment_counts = HashMap::new();
    if order == FeedOrder::Trending {
        for meme in &memes {
            let count = state.stores.content().comments_count_for(meme.id).await?;
            comment_counts.insert(meme.id, count);
        }
    }

    let mut ranked = engine::rank_feed(&memes, &comment_counts, order, Utc::now());
    ranked.truncate(limit);
    Ok(Json(ranked.into_iter().map(FeedMemeDto::from).collect()))
}

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    limit: Option<usize>,
}

#[instrument(skip(state))]
async fn get_leaderboard(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult<Json<Vec<LeaderboardEntryDto>>> {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let rows = state.stores.stats().leaderboard(limit).await?;
    Ok(Json(
        rows.into_iter().map(LeaderboardEntryDto::from).collect(),
    ))
}

#[derive(Debug, Deserialize)]
struct AwardRequest {
    user_id: i64,
    action: String,
    #[serde(default = "default_multiplier")]
    multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

#[instrument(skip(state))]
async fn post_award(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AwardRequest>,
) -> ApiResult<Json<AwardResponse>> {
    let result = state
        .awarder
        .award(request.user_id, &request.action, request.multiplier)
        .await;
    let outcome_label = if result.is_ok() { "success" } else { "error" };
    // Only canonical action kinds become label values; arbitrary client
    // strings would grow the label set without bound.
    let action_label = ActionKind::parse(&request.action).map_or("unknown", |kind| kind.as_str());
    AWARDS_TOTAL
        .with_label_values(&[action_label, outcome_label])
        .inc();
    Ok(Json(AwardResponse::from(result?)))
}

#[instrument]
async fn metrics() -> ApiResult<impl IntoResponse> {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let content_type = encoder.format_type().to_string();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok((
        axum::http::StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, content_type)],
        buffer,
    ))
}
