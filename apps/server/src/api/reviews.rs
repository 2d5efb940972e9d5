use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{actor::Actor, error::ApiResult, main_lib::AppState};
use epms_core::reviews::{
    NewReview, Review, ReviewComparison, ReviewFilters, ReviewSummary, ReviewUpdate,
};

#[derive(Deserialize)]
struct ComparisonQuery {
    quarter: Option<String>,
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
    Json(review): Json<NewReview>,
) -> ApiResult<(StatusCode, Json<Review>)> {
    let r = state.review_service.create_review(&actor, review).await?;
    Ok((StatusCode::CREATED, Json(r)))
}

async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
    Query(filters): Query<ReviewFilters>,
) -> ApiResult<Json<Vec<Review>>> {
    let reviews = state.review_service.list_reviews(&actor, filters)?;
    Ok(Json(reviews))
}

async fn get_review(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<Review>> {
    let review = state.review_service.get_review(&actor, &id)?;
    Ok(Json(review))
}

async fn update_review(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
    Json(changes): Json<ReviewUpdate>,
) -> ApiResult<Json<Review>> {
    let review = state.review_service.update_review(&actor, &id, changes).await?;
    Ok(Json(review))
}

async fn delete_review(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<StatusCode> {
    state.review_service.delete_review(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_review_comparison(
    Path(goal_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
    Query(query): Query<ComparisonQuery>,
) -> ApiResult<Json<Vec<ReviewComparison>>> {
    let comparisons =
        state
            .review_service
            .compare(&actor, &goal_id, query.quarter.as_deref())?;
    Ok(Json(comparisons))
}

async fn get_review_summary(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<ReviewSummary>> {
    let summary = state.review_service.summary(&actor)?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reviews", get(list_reviews).post(create_review))
        .route("/reviews/summary", get(get_review_summary))
        .route(
            "/reviews/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        .route("/reviews/comparison/{goal_id}", get(get_review_comparison))
}
