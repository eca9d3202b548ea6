use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    extract::{Payload, parse_id},
    guard::{ADMIN_ONLY_MESSAGE, Capability},
    handlers::email_conflict,
    models::{MessageResponse, UpdateUserRequest, UserChanges, UserProfile},
    password::hash_password,
};
use axum::{
    Json,
    extract::{Path, State},
};

pub const USER_NOT_FOUND: &str = "User not found.";

/// get_users
///
/// [Admin Route] Lists every user, newest first. Password hashes never leave the repository layer.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = [UserProfile]),
        (status = 403, description = "Not an admin", body = MessageResponse)
    )
)]
pub async fn get_users(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    user.authorize(&Capability::ListUsers, ADMIN_ONLY_MESSAGE)?;
    let users = state.repo.list_users().await?;
    Ok(Json(users.into_iter().map(UserProfile::from).collect()))
}

/// get_profile
///
/// [Authenticated Route] The requester's own profile, as resolved by the token verifier.
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses((status = 200, description = "Profile", body = UserProfile))
)]
pub async fn get_profile(AuthUser { profile, .. }: AuthUser) -> Json<UserProfile> {
    Json(profile)
}

/// get_user
///
/// [Admin Route] A single user's profile.
#[utoipa::path(
    get,
    path = "/api/users/view/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Found", body = UserProfile),
        (status = 403, description = "Not an admin", body = MessageResponse),
        (status = 404, description = "Not Found", body = MessageResponse)
    )
)]
pub async fn get_user(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    user.authorize(&Capability::ViewUser, ADMIN_ONLY_MESSAGE)?;
    let id = parse_id(&id, USER_NOT_FOUND)?;
    state
        .repo
        .get_user(id)
        .await?
        .map(|found| Json(UserProfile::from(found)))
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))
}

/// update_user
///
/// [Admin Route] Partial update of name, email, role and password.
/// A new password is hashed before it is stored.
#[utoipa::path(
    put,
    path = "/api/users/update/{id}",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Validation failed (field -> message map)"),
        (status = 403, description = "Not an admin", body = MessageResponse),
        (status = 404, description = "Not Found", body = MessageResponse)
    )
)]
pub async fn update_user(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.authorize(&Capability::UpdateUser, ADMIN_ONLY_MESSAGE)?;
    payload.validate().map_err(ApiError::Validation)?;
    let id = parse_id(&id, USER_NOT_FOUND)?;

    let password_hash = payload
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    let changes = UserChanges {
        name: payload.name.map(|name| name.trim().to_string()),
        email: payload.email,
        role: payload.role,
        password_hash,
    };

    state
        .repo
        .update_user(id, changes)
        .await
        .map_err(email_conflict)?
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?;
    tracing::info!(user_id = %id, admin_id = %user.id, "user updated");

    Ok(Json(MessageResponse::new("User updated!")))
}

/// delete_user
///
/// [Admin Route] Removes a user together with every post they own.
#[utoipa::path(
    delete,
    path = "/api/users/delete/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Not an admin", body = MessageResponse),
        (status = 404, description = "Not Found", body = MessageResponse)
    )
)]
pub async fn delete_user(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.authorize(&Capability::DeleteUser, ADMIN_ONLY_MESSAGE)?;
    let id = parse_id(&id, USER_NOT_FOUND)?;

    if !state.repo.delete_user(id).await? {
        return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
    }
    tracing::info!(user_id = %id, admin_id = %user.id, "user deleted");

    Ok(Json(MessageResponse::new("User deleted!")))
}
