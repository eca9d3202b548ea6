use crate::{AppState, handlers::users};
use axum::{
    Router,
    routing::{delete, get, put},
};

/// Admin Router Module
///
/// User-management routes. `create_router` wraps this router in the authentication
/// layer and then in `guard::require_user_admin`, so a non-admin is rejected with 403
/// before any handler runs. Each handler re-checks its own capability.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /api/users
        .route("/api/users", get(users::get_users))
        // GET /api/users/view/{id}
        .route("/api/users/view/{id}", get(users::get_user))
        // PUT /api/users/update/{id}
        .route("/api/users/update/{id}", put(users::update_user))
        // DELETE /api/users/delete/{id}
        // Also removes every post the user owns.
        .route("/api/users/delete/{id}", delete(users::delete_user))
}
