use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{actor::Actor, error::ApiResult, main_lib::AppState};
use epms_core::users::{NewUser, User};

#[derive(Deserialize)]
struct ListQuery {
    active_only: Option<bool>,
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Actor(_actor): Actor,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_service.list_users(query.active_only)?;
    Ok(Json(users))
}

async fn get_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(_actor): Actor,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get_user(&id)?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let u = state.user_service.create_user(user)?;
    Ok((StatusCode::CREATED, Json(u)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
}
