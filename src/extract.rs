use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use uuid::Uuid;

use crate::error::ApiError;

/// Payload
///
/// `Json<T>` with body-parse failures reported as an `ApiError` (400 with a JSON
/// `message`) instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Payload(value))
    }
}

/// Parses a path identifier. Anything that is not a UUID cannot name an existing
/// record, so it is reported as the same 404 a missing record would get.
pub fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(not_found.to_string()))
}
