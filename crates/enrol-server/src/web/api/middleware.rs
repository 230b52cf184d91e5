use crate::state::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use enrol_common::models::auth::Claims;
use serde_json::json;
use std::sync::Arc;

/// Extractor that validates a JWT Bearer token and provides the claims.
/// Handlers taking `AuthUser` reject the request with 401 before running.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match auth_header {
            Some(val) => match val.strip_prefix("Bearer ") {
                Some(t) => t.trim(),
                None => return Err(unauthorized("Invalid authorization header format")),
            },
            None => return Err(unauthorized("Missing authorization header")),
        };

        match state.verifier.verify(token) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                Err(unauthorized("Invalid token"))
            }
        }
    }
}
