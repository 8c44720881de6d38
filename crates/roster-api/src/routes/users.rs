//! Protected user-list routes

use axum::{Extension, Json, Router, extract::State, routing::get};
use roster_auth::AuthUser;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

use super::types::UserResponse;

/// GET /api/users
///
/// The auth middleware has already validated the bearer token and
/// attached the resolved identity to the request extensions.
async fn list_users(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!("User {} requested the user list", user.username);

    let users = state.db.list_users().await?;

    Ok(Json(
        users
            .into_iter()
            .map(|u| UserResponse {
                id: u.id,
                username: u.username,
                created_at: u.created_at.to_rfc3339(),
            })
            .collect(),
    ))
}

/// Create user routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/users", get(list_users))
}
