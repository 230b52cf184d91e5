use crate::error::FlowError;
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use crate::{registration, retrieval};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use enrol_common::models::user::RegistrationInput;
use std::sync::Arc;

/// POST /api/users - Register a user and return `{id, accessToken}`
#[tracing::instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegistrationInput>, JsonRejection>,
) -> Result<impl IntoResponse, FlowError> {
    let Json(input) = payload?;
    let response = registration::register(
        state.store.as_ref(),
        &state.deriver,
        &state.issuer,
        input,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/users - List all users (unfiltered)
#[tracing::instrument(skip(state, _auth))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, FlowError> {
    let users = retrieval::list_users(state.store.as_ref()).await?;
    Ok(Json(users))
}

/// GET /api/users/{*id} - Get one user, email redacted without consent
#[tracing::instrument(skip(state, _auth))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, FlowError> {
    let user = retrieval::get_user(state.store.as_ref(), &id).await?;
    Ok(Json(user))
}
