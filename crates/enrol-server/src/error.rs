use crate::auth::AuthError;
use crate::identity::IdentityError;
use axum::extract::rejection::JsonRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures of the registration and retrieval flows
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("user not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("store error: {0:#}")]
    Store(#[from] anyhow::Error),

    #[error(transparent)]
    Token(#[from] AuthError),
}

impl From<IdentityError> for FlowError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::EmptyEmail => FlowError::InvalidInput(e.to_string()),
            IdentityError::InvalidKey => FlowError::Store(anyhow::anyhow!(e)),
        }
    }
}

impl From<JsonRejection> for FlowError {
    fn from(rejection: JsonRejection) -> Self {
        FlowError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for FlowError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            FlowError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message.clone()),
            FlowError::NotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            FlowError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            FlowError::Store(e) => {
                tracing::error!("Store error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            FlowError::Token(e) => {
                tracing::error!("Token error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (FlowError::InvalidInput("x".to_string()), StatusCode::BAD_REQUEST),
            (FlowError::NotFound, StatusCode::NOT_FOUND),
            (FlowError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                FlowError::Store(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                FlowError::Token(AuthError::InvalidSignature),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_empty_email_maps_to_invalid_input() {
        let error: FlowError = IdentityError::EmptyEmail.into();
        assert!(matches!(error, FlowError::InvalidInput(_)));
    }
}
