use crate::{
    AppState,
    handlers::{posts, users},
};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Authenticated Router Module
///
/// Routes available to any identity that passed token verification.
/// Post mutation is further restricted to the post owner inside the handlers.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/users/profile
        .route("/api/users/profile", get(users::get_profile))
        // POST /api/posts
        // Creates a post owned by the requester.
        .route("/api/posts", post(posts::create_post))
        // PUT/DELETE /api/posts/{id}
        // Owner-only: 403 for anyone else.
        .route(
            "/api/posts/{id}",
            put(posts::update_post).delete(posts::delete_post),
        )
}
