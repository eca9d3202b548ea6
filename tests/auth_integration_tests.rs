use axum::{
    extract::FromRequestParts,
    http::{Method, Request, StatusCode, Uri, header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use postboard::{
    AppState, InMemoryRepository,
    auth::{AuthUser, Claims, extract_token, issue_token, verify_token},
    config::AppConfig,
    guard::{Capability, Owner, Policy},
    models::{Role, User},
};
use std::sync::Arc;
use uuid::Uuid;

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
const TEST_USER_ID: Uuid = Uuid::from_u128(1);

fn test_user(id: Uuid, role: Role) -> User {
    User {
        id,
        name: "Test User".to_string(),
        email: format!("{id}@example.com"),
        password_hash: String::new(),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn create_token(user_id: Uuid, exp_offset: i64, secret: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        id: user_id,
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

async fn create_app_state(users: Vec<User>) -> AppState {
    let repo = InMemoryRepository::new();
    for user in users {
        repo.insert_user(user).await;
    }
    let config = AppConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    };
    AppState {
        repo: Arc::new(repo),
        config,
    }
}

fn request_parts(authorization: Option<&str>) -> Parts {
    let mut builder = Request::builder()
        .method(Method::GET)
        .uri("/".parse::<Uri>().unwrap());
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let (parts, _) = builder.body(axum::body::Body::empty()).unwrap().into_parts();
    parts
}

async fn resolve(state: &AppState, authorization: Option<&str>) -> Result<AuthUser, StatusCode> {
    let mut parts = request_parts(authorization);
    AuthUser::from_request_parts(&mut parts, state)
        .await
        .map_err(|e| e.status())
}

// --- Token Verifier ---

#[tokio::test]
async fn test_auth_success_with_jwt_scheme() {
    let state = create_app_state(vec![test_user(TEST_USER_ID, Role::Standard)]).await;
    let token = create_token(TEST_USER_ID, 3600, TEST_JWT_SECRET);

    let user = resolve(&state, Some(&format!("jwt {token}"))).await.unwrap();

    assert_eq!(user.id, TEST_USER_ID);
    assert_eq!(user.role, Role::Standard);
    assert_eq!(user.profile.email, format!("{TEST_USER_ID}@example.com"));
}

#[tokio::test]
async fn test_auth_scheme_is_case_insensitive() {
    let state = create_app_state(vec![test_user(TEST_USER_ID, Role::Standard)]).await;
    let token = create_token(TEST_USER_ID, 3600, TEST_JWT_SECRET);

    assert!(resolve(&state, Some(&format!("JWT {token}"))).await.is_ok());
    assert!(resolve(&state, Some(&format!("Jwt {token}"))).await.is_ok());
}

#[tokio::test]
async fn test_auth_rejects_bearer_scheme() {
    let state = create_app_state(vec![test_user(TEST_USER_ID, Role::Standard)]).await;
    let token = create_token(TEST_USER_ID, 3600, TEST_JWT_SECRET);

    let result = resolve(&state, Some(&format!("Bearer {token}"))).await;
    assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_missing_header() {
    let state = create_app_state(vec![test_user(TEST_USER_ID, Role::Standard)]).await;

    let result = resolve(&state, None).await;
    assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_wrong_secret() {
    let state = create_app_state(vec![test_user(TEST_USER_ID, Role::Standard)]).await;
    let token = create_token(TEST_USER_ID, 3600, "some-other-secret");

    let result = resolve(&state, Some(&format!("jwt {token}"))).await;
    assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_expired_jwt() {
    let state = create_app_state(vec![test_user(TEST_USER_ID, Role::Standard)]).await;
    // Well past the default validation leeway.
    let token = create_token(TEST_USER_ID, -3600, TEST_JWT_SECRET);

    let result = resolve(&state, Some(&format!("jwt {token}"))).await;
    assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_garbage_token() {
    let state = create_app_state(vec![test_user(TEST_USER_ID, Role::Standard)]).await;

    let result = resolve(&state, Some("jwt not.a.token")).await;
    assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_when_user_no_longer_exists() {
    let state = create_app_state(vec![]).await;
    let token = create_token(TEST_USER_ID, 3600, TEST_JWT_SECRET);

    let result = resolve(&state, Some(&format!("jwt {token}"))).await;
    assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_identity_in_extensions_is_reused() {
    // No user in the store and no header: only the extension can satisfy the extractor.
    let state = create_app_state(vec![]).await;
    let mut parts = request_parts(None);
    parts
        .extensions
        .insert(AuthUser::from(test_user(TEST_USER_ID, Role::Admin)));

    let user = AuthUser::from_request_parts(&mut parts, &state).await.unwrap();
    assert_eq!(user.id, TEST_USER_ID);
    assert_eq!(user.role, Role::Admin);
}

#[test]
fn test_issue_token_verifies_with_same_secret_only() {
    let config = AppConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    };

    let token = issue_token(TEST_USER_ID, &config).unwrap();

    assert_eq!(verify_token(&token, TEST_JWT_SECRET).unwrap(), TEST_USER_ID);
    assert_eq!(
        verify_token(&token, "wrong").unwrap_err().status(),
        StatusCode::UNAUTHORIZED
    );
}

#[test]
fn test_extract_token_header_shapes() {
    assert_eq!(extract_token("jwt abc.def.ghi"), Some("abc.def.ghi"));
    assert_eq!(extract_token("  jwt   abc.def.ghi  "), Some("abc.def.ghi"));
    assert_eq!(extract_token("jwt"), None);
    assert_eq!(extract_token("jwt   "), None);
    assert_eq!(extract_token("Bearer abc.def.ghi"), None);
    assert_eq!(extract_token("abc.def.ghi"), None);
}

// --- Access Guard ---

#[test]
fn test_capabilities_follow_role() {
    let admin = AuthUser::from(test_user(Uuid::new_v4(), Role::Admin));
    let standard = AuthUser::from(test_user(Uuid::new_v4(), Role::Standard));

    for capability in [
        Capability::ListUsers,
        Capability::ViewUser,
        Capability::UpdateUser,
        Capability::DeleteUser,
    ] {
        assert!(capability.allows(&admin));
        assert!(!capability.allows(&standard));
    }
}

#[test]
fn test_owner_policy_ignores_role() {
    let owner_id = Uuid::new_v4();
    let owner = AuthUser::from(test_user(owner_id, Role::Standard));
    let admin = AuthUser::from(test_user(Uuid::new_v4(), Role::Admin));

    assert!(Owner(owner_id).allows(&owner));
    assert!(!Owner(owner_id).allows(&admin));
}

#[test]
fn test_authorize_denial_is_forbidden_with_message() {
    let standard = AuthUser::from(test_user(Uuid::new_v4(), Role::Standard));

    let err = standard
        .authorize(&Capability::DeleteUser, "nope")
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(err.to_string(), "nope");
}
