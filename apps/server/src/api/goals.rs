use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::{actor::Actor, error::ApiResult, main_lib::AppState};
use epms_core::goals::{Goal, GoalProgressHistory, GoalUpdate, NewGoal, ProgressUpdate};

#[derive(serde::Deserialize)]
struct ReviewRequest {
    action: String,
    feedback: Option<String>,
}

#[derive(Serialize)]
struct SubmitAllResponse {
    updated: usize,
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
    Json(goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let g = state.goal_service.create_goal(&actor, goal).await?;
    Ok((StatusCode::CREATED, Json(g)))
}

async fn list_goals(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.list_goals(&actor)?;
    Ok(Json(goals))
}

async fn list_all_goals(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.list_all_goals(&actor)?;
    Ok(Json(goals))
}

async fn list_goals_for_review(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.list_for_review(&actor)?;
    Ok(Json(goals))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<Goal>> {
    let goal = state.goal_service.get_goal(&actor, &id)?;
    Ok(Json(goal))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
    Json(changes): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    let goal = state.goal_service.update_goal(&actor, &id, changes).await?;
    Ok(Json(goal))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit_all_goals(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<SubmitAllResponse>> {
    let updated = state.goal_service.submit_all(&actor).await?;
    Ok(Json(SubmitAllResponse { updated }))
}

async fn review_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
    Json(request): Json<ReviewRequest>,
) -> ApiResult<Json<Goal>> {
    let goal =
        state
            .goal_service
            .review_goal(&actor, &id, &request.action, request.feedback)
            .await?;
    Ok(Json(goal))
}

async fn update_goal_progress(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
    Json(update): Json<ProgressUpdate>,
) -> ApiResult<Json<Goal>> {
    let goal =
        state
            .goal_service
            .update_progress(&actor, &id, update.progress, update.comments)
            .await?;
    Ok(Json(goal))
}

async fn get_goal_progress_history(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<Vec<GoalProgressHistory>>> {
    let history = state.goal_service.progress_history(&actor, &id)?;
    Ok(Json(history))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/all", get(list_all_goals))
        .route("/goals/review", get(list_goals_for_review))
        .route("/goals/submit-all", post(submit_all_goals))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/review", post(review_goal))
        .route(
            "/goals/{id}/progress",
            get(get_goal_progress_history).post(update_goal_progress),
        )
}
