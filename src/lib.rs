use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod validation;

// Routing segregated by access level (Public, Authenticated, Admin).
pub mod routes;
use auth::AuthUser;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for every handler annotated with `#[utoipa::path]`,
/// served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::session::register, handlers::session::login,
        handlers::posts::get_posts, handlers::posts::get_posts_by_user, handlers::posts::get_post,
        handlers::posts::create_post, handlers::posts::update_post, handlers::posts::delete_post,
        handlers::users::get_users, handlers::users::get_profile, handlers::users::get_user,
        handlers::users::update_user, handlers::users::delete_user,
    ),
    components(
        schemas(
            models::Post, models::PostPayload, models::Role, models::UserProfile,
            models::UpdateUserRequest, models::RegisterRequest, models::LoginRequest,
            models::MessageResponse, models::TokenResponse,
        )
    ),
    tags(
        (name = "postboard", description = "Users and posts API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Persistence behind the `Repository` trait (Postgres or in-memory).
    pub repo: RepositoryState,
    /// The loaded environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Let extractors (notably `AuthUser`) pull only the parts of the state they need.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication on a router. Resolving `AuthUser` runs token verification;
/// failure rejects the request with 401 before the handler is reached. On success the
/// identity is stored in the request extensions so later extractors reuse it.
async fn auth_middleware(user: AuthUser, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(user);
    next.run(request).await
}

/// create_router
///
/// Assembles the whole routing tree, applies the access layers per module, and
/// wraps everything in the observability stack.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // The last route_layer added runs first: authenticate, then check the capability.
        .merge(
            admin::admin_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    guard::require_user_admin,
                ))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                // Generates a UUID x-request-id for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Returns the x-request-id header to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: method, uri and the request id, so every log line
/// of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
