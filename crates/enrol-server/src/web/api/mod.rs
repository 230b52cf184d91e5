pub mod auth;
pub mod middleware;
pub mod users;

use crate::state::AppState;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

/// GET /api/health
async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        // `/user` is kept as an alias of `/users`. Ids are base64 and may
        // contain '/', hence the catch-all segment.
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{*id}", get(users::get_user))
        .route("/user", get(users::list_users).post(users::create_user))
        .route("/user/{*id}", get(users::get_user))
        .route("/auth/me", get(auth::me))
        .with_state(state)
}
