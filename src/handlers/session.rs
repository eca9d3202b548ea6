use crate::{
    AppState,
    auth::{AUTH_SCHEME, issue_token},
    error::ApiError,
    extract::Payload,
    handlers::{EMAIL_TAKEN, email_conflict},
    models::{LoginRequest, MessageResponse, NewUser, RegisterRequest, Role, TokenResponse},
    password::{hash_password, placeholder_hash, verify_password},
};
use axum::{Json, extract::State, http::StatusCode};

/// register
///
/// [Public Route] Creates a standard user. Roles can only be raised afterwards by an admin.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = MessageResponse),
        (status = 400, description = "Validation failed or email taken (field -> message map)")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Payload(payload): Payload<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    if state.repo.find_user_by_email(&payload.email).await?.is_some() {
        return Err(ApiError::field("email", EMAIL_TAKEN));
    }

    let new_user = NewUser {
        name: payload.name.trim().to_string(),
        email: payload.email,
        password_hash: hash_password(&payload.password)?,
        role: Role::Standard,
    };
    let user = state
        .repo
        .create_user(new_user)
        .await
        .map_err(email_conflict)?;
    tracing::info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(MessageResponse::new("User registered!"))))
}

/// login
///
/// [Public Route] Exchanges credentials for a signed token. Unknown email and wrong
/// password produce the same 401 so the response does not reveal which one failed.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Payload(payload): Payload<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state.repo.find_user_by_email(&payload.email).await?;

    // Unknown emails still pay for a verification.
    let stored_hash = match &user {
        Some(user) => user.password_hash.as_str(),
        None => placeholder_hash(),
    };
    let verified = verify_password(&payload.password, stored_hash);

    let user = match user {
        Some(user) if verified => user,
        _ => return Err(ApiError::InvalidCredentials),
    };

    let token = issue_token(user.id, &state.config)?;
    Ok(Json(TokenResponse {
        token,
        token_type: AUTH_SCHEME.to_string(),
    }))
}
