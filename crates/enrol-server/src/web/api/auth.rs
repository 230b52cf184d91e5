use crate::web::api::middleware::AuthUser;
use axum::{response::IntoResponse, Json};

/// GET /api/auth/me - claims of the presented token
#[tracing::instrument(skip(auth))]
pub async fn me(auth: AuthUser) -> impl IntoResponse {
    Json(auth.0)
}
