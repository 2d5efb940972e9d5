use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::main_lib::AppState;
use epms_core::errors::Error as CoreError;
use epms_core::users::User;

/// The acting principal, resolved through the user directory.
///
/// Session/token mechanics live outside this service; the deployment's
/// gateway authenticates the caller and forwards the user id.
pub struct Actor(pub User);

const USER_ID_HEADER: &str = "x-user-id";

impl FromRequestParts<Arc<AppState>> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Missing x-user-id header".to_string()))?;

        let user = state.user_service.get_user(user_id).map_err(|e| match e {
            CoreError::NotFound(_) => ApiError::Unauthorized("Unknown user".to_string()),
            other => ApiError::Core(other),
        })?;

        Ok(Actor(user))
    }
}
