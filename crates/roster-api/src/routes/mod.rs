//! API routes

mod auth;
mod health;
pub mod types;
mod users;

use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;
use roster_auth::auth_middleware;

/// Root handler, on the public allow-list
async fn index() -> Json<Value> {
    Json(json!({
        "service": "roster",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Create the main router
///
/// The auth middleware wraps every route; it decides public vs protected
/// by path, so unknown protected paths are rejected before routing.
pub fn create_router(state: AppState) -> Router {
    let jwt = state.jwt.clone();

    Router::new()
        .route("/", get(index))
        .merge(health::routes())
        .merge(auth::routes())
        .merge(users::routes())
        .layer(middleware::from_fn_with_state(jwt, auth_middleware))
        .with_state(state)
}
