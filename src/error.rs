use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{models::MessageResponse, repository::RepositoryError, validation::FieldErrors};

pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// ApiError
///
/// Every failure a handler or extractor can produce. Nothing leaves the HTTP boundary
/// unformatted: each variant maps to a status code and a JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// Field -> message map, returned as the response body itself.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    /// Missing, malformed, expired or unresolvable token.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Authenticated, but the identity is not permitted to act.
    #[error("{0}")]
    Forbidden(String),

    #[error("repository failure: {0}")]
    Repository(#[from] RepositoryError),

    #[error("internal failure: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Repository(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convenience for a single-field validation failure.
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.to_string());
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => (status, Json(errors)).into_response(),
            ApiError::Repository(_) | ApiError::Internal(_) => {
                // The cause is logged here and never sent to the client.
                tracing::error!(error = %self, "request failed");
                (status, Json(MessageResponse::new(INTERNAL_MESSAGE))).into_response()
            }
            other => (status, Json(MessageResponse::new(other.to_string()))).into_response(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
