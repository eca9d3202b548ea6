//! Authorization predicates.
//!
//! Access decisions are expressed as [`Policy`] values evaluated against an
//! [`AuthUser`]: capabilities granted by a role, or ownership of a record. Handlers
//! and the admin route layer both go through [`AuthUser::authorize`].

use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

use crate::{auth::AuthUser, error::ApiError, models::Role};

pub const ADMIN_ONLY_MESSAGE: &str = "You are not authorized to access this resource.";

/// A named permission a role may grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ListUsers,
    ViewUser,
    UpdateUser,
    DeleteUser,
}

impl Capability {
    /// Capabilities reserved for administrators.
    pub fn is_admin_only(&self) -> bool {
        match self {
            Capability::ListUsers
            | Capability::ViewUser
            | Capability::UpdateUser
            | Capability::DeleteUser => true,
        }
    }
}

impl Role {
    pub fn grants(&self, capability: Capability) -> bool {
        match self {
            Role::Admin => true,
            Role::Standard => !capability.is_admin_only(),
        }
    }
}

pub trait Policy {
    fn allows(&self, user: &AuthUser) -> bool;
}

impl Policy for Capability {
    fn allows(&self, user: &AuthUser) -> bool {
        user.role.grants(*self)
    }
}

/// Satisfied only by the identity whose id matches the record owner.
#[derive(Debug, Clone, Copy)]
pub struct Owner(pub Uuid);

impl Policy for Owner {
    fn allows(&self, user: &AuthUser) -> bool {
        user.id == self.0
    }
}

impl AuthUser {
    /// `Ok(())` if `policy` allows this identity, otherwise a 403 carrying `message`.
    pub fn authorize(&self, policy: &impl Policy, message: &str) -> Result<(), ApiError> {
        if policy.allows(self) {
            Ok(())
        } else {
            tracing::debug!(user_id = %self.id, "authorization denied: {message}");
            Err(ApiError::Forbidden(message.to_string()))
        }
    }
}

/// require_user_admin
///
/// Route layer for the user-management routes. Runs after authentication has
/// resolved the identity and rejects anyone without the user-management capability
/// before the handler (or its body extractor) runs.
pub async fn require_user_admin(
    user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    user.authorize(&Capability::ListUsers, ADMIN_ONLY_MESSAGE)?;
    Ok(next.run(request).await)
}
