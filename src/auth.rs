use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::ApiError,
    models::{Role, User, UserProfile},
    repository::RepositoryState,
};

/// The authorization scheme clients must use: `Authorization: jwt <token>`.
pub const AUTH_SCHEME: &str = "jwt";

/// Claims
///
/// Payload carried inside every issued token, signed with `AppConfig::jwt_secret`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user's id, used to resolve the identity on every request.
    pub id: Uuid,
    /// Expiration time (seconds since epoch). Always validated.
    pub exp: usize,
    /// Issued at (seconds since epoch).
    pub iat: usize,
}

/// AuthUser
///
/// The resolved identity of an authenticated request. Handlers take it as an
/// argument; authorization decisions go through `AuthUser::authorize`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
    pub profile: UserProfile,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            profile: UserProfile::from(user),
        }
    }
}

/// Signs a fresh token for `user_id`, valid for `config.jwt_ttl_secs`.
pub fn issue_token(user_id: Uuid, config: &AppConfig) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        id: user_id,
        iat: now as usize,
        exp: (now + config.jwt_ttl_secs) as usize,
    };
    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    encode(&Header::default(), &claims, &key)
        .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
}

/// Pulls the token out of an `Authorization` value. The scheme is matched
/// case-insensitively; anything other than `jwt` (including `Bearer`) is rejected.
pub fn extract_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case(AUTH_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Decodes and validates a token, returning the embedded user id.
pub fn verify_token(token: &str, secret: &str) -> Result<Uuid, ApiError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims.id)
        .map_err(|e| {
            tracing::debug!("token rejected: {e}");
            ApiError::Unauthorized
        })
}

/// AuthUser Extractor Implementation
///
/// 1. Reuses an identity already placed in the request extensions by the auth middleware.
/// 2. Extracts the `jwt`-scheme token from the Authorization header.
/// 3. Verifies signature and expiry against the shared secret.
/// 4. Looks the user up, so a deleted user's token stops working immediately.
///
/// Rejection: `ApiError::Unauthorized` (401) on any failure. A repository failure is a 500.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_token)
            .ok_or(ApiError::Unauthorized)?;

        let user_id = verify_token(token, &config.jwt_secret)?;

        let user = repo
            .get_user(user_id)
            .await?
            // A valid signature for a user that no longer exists.
            .ok_or(ApiError::Unauthorized)?;

        Ok(AuthUser::from(user))
    }
}
