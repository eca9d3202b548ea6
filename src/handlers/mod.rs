//! Request handlers, one module per controller.
//!
//! Every handler returns `Result<_, ApiError>`; persistence errors propagate with `?`
//! and are turned into a generic 500 at the response boundary.

use crate::{error::ApiError, repository::RepositoryError};

pub mod posts;
pub mod session;
pub mod users;

pub const EMAIL_TAKEN: &str = "Email already exists.";

/// A unique-email violation surfaces as the same 400 the pre-insert check gives.
pub(crate) fn email_conflict(error: RepositoryError) -> ApiError {
    match error {
        RepositoryError::Conflict("email") => ApiError::field("email", EMAIL_TAKEN),
        other => ApiError::Repository(other),
    }
}
