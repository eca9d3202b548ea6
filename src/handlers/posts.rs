use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    extract::{Payload, parse_id},
    guard::Owner,
    models::{MessageResponse, Post, PostPayload},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

pub const POST_NOT_FOUND: &str = "Post not found.";
pub const NOT_OWNER_UPDATE: &str = "You are not authorized to update this post.";
pub const NOT_OWNER_DELETE: &str = "You are not authorized to delete this post.";

/// get_posts
///
/// [Public Route] Lists every post, newest first. An empty store is a 200 with `[]`.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses((status = 200, description = "All posts", body = [Post]))
)]
pub async fn get_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.repo.list_posts().await?))
}

/// get_posts_by_user
///
/// [Public Route] Lists the posts owned by one user, newest first.
/// An id that is not a UUID owns nothing, so it yields `[]` like an unknown user.
#[utoipa::path(
    get,
    path = "/api/posts/user/{id}",
    params(("id" = String, Path, description = "Owner user ID")),
    responses((status = 200, description = "Posts by user", body = [Post]))
)]
pub async fn get_posts_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let Ok(user_id) = Uuid::parse_str(&user_id) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(state.repo.list_posts_by_user(user_id).await?))
}

/// get_post
///
/// [Public Route] Retrieves a single post.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Found", body = Post),
        (status = 404, description = "Not Found", body = MessageResponse)
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id = parse_id(&id, POST_NOT_FOUND)?;
    state
        .repo
        .get_post(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(POST_NOT_FOUND.to_string()))
}

/// create_post
///
/// [Authenticated Route] Creates a post owned by the requester.
/// The owner always comes from the verified identity, never from the body.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = PostPayload,
    responses(
        (status = 201, description = "Created", body = MessageResponse),
        (status = 400, description = "Validation failed (field -> message map)")
    )
)]
pub async fn create_post(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Payload(payload): Payload<PostPayload>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let post = state
        .repo
        .create_post(user_id, payload.title, payload.content)
        .await?;
    tracing::info!(post_id = %post.id, %user_id, "post created");

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Post created!"))))
}

/// update_post
///
/// [Authenticated Route] Replaces title and content of a post.
///
/// Order of checks: body validation (400), existence (404), ownership (403).
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    request_body = PostPayload,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Validation failed (field -> message map)"),
        (status = 403, description = "Not Owner", body = MessageResponse),
        (status = 404, description = "Not Found", body = MessageResponse)
    )
)]
pub async fn update_post(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<PostPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let id = parse_id(&id, POST_NOT_FOUND)?;
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(POST_NOT_FOUND.to_string()))?;

    user.authorize(&Owner(post.user_id), NOT_OWNER_UPDATE)?;

    state
        .repo
        .update_post(id, payload.title, payload.content)
        .await?
        // Deleted between the lookup and the update.
        .ok_or_else(|| ApiError::NotFound(POST_NOT_FOUND.to_string()))?;

    Ok(Json(MessageResponse::new("Post updated!")))
}

/// delete_post
///
/// [Authenticated Route] Removes a post. Only its owner may do so.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Not Owner", body = MessageResponse),
        (status = 404, description = "Not Found", body = MessageResponse)
    )
)]
pub async fn delete_post(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, POST_NOT_FOUND)?;
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(POST_NOT_FOUND.to_string()))?;

    user.authorize(&Owner(post.user_id), NOT_OWNER_DELETE)?;

    if !state.repo.delete_post(id).await? {
        return Err(ApiError::NotFound(POST_NOT_FOUND.to_string()));
    }
    tracing::info!(post_id = %id, user_id = %user.id, "post deleted");

    Ok(Json(MessageResponse::new("Post deleted!")))
}
