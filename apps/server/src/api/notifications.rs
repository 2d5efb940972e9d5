use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{actor::Actor, error::ApiResult, main_lib::AppState};
use epms_core::notifications::Notification;

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    unread_only: bool,
    limit: Option<i64>,
}

#[derive(Serialize)]
struct UnreadCountResponse {
    unread_count: i64,
}

#[derive(Serialize)]
struct MarkAllReadResponse {
    marked_read: usize,
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications =
        state
            .notification_service
            .list_notifications(&actor.id, query.unread_only, query.limit)?;
    Ok(Json(notifications))
}

async fn get_unread_count(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<UnreadCountResponse>> {
    let unread_count = state.notification_service.unread_count(&actor.id)?;
    Ok(Json(UnreadCountResponse { unread_count }))
}

async fn mark_notification_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<Notification>> {
    let notification = state.notification_service.mark_read(&actor.id, &id)?;
    Ok(Json(notification))
}

async fn mark_all_notifications_read(
    State(state): State<Arc<AppState>>,
    Actor(actor): Actor,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let marked_read = state.notification_service.mark_all_read(&actor.id)?;
    Ok(Json(MarkAllReadResponse { marked_read }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(get_unread_count))
        .route(
            "/notifications/mark-all-read",
            put(mark_all_notifications_read),
        )
        .route("/notifications/{id}/read", put(mark_notification_read))
}
