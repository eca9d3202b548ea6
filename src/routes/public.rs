use crate::{
    AppState,
    handlers::{posts, session},
};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a token: health, registration/login, and every
/// read-only post listing.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for monitoring and load balancers.
        .route("/health", get(|| async { "ok" }))
        // POST /api/auth/register
        .route("/api/auth/register", post(session::register))
        // POST /api/auth/login
        // Returns a token to be sent back as `Authorization: jwt <token>`.
        .route("/api/auth/login", post(session::login))
        // GET /api/posts
        .route("/api/posts", get(posts::get_posts))
        // GET /api/posts/user/{id}
        .route("/api/posts/user/{id}", get(posts::get_posts_by_user))
        // GET /api/posts/{id}
        .route("/api/posts/{id}", get(posts::get_post))
}
