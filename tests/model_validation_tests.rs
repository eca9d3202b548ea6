use chrono::Utc;
use postboard::{
    models::{PostPayload, RegisterRequest, Role, UpdateUserRequest, User, UserProfile},
    validation::{CONTENT_MESSAGE, TITLE_MESSAGE, char_length, is_email},
};
use uuid::Uuid;

fn payload(title: &str, content: &str) -> PostPayload {
    PostPayload {
        title: title.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn test_post_payload_accepts_length_boundaries() {
    assert!(payload("Hello", "0123456789").validate().is_ok());
    assert!(payload(&"t".repeat(100), &"c".repeat(1000)).validate().is_ok());
}

#[test]
fn test_short_title_names_only_title_field() {
    let errors = payload("Hi", "This is valid content.").validate().unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("title").map(String::as_str), Some(TITLE_MESSAGE));
}

#[test]
fn test_long_title_and_short_content_both_reported() {
    let errors = payload(&"t".repeat(101), "too short").validate().unwrap_err();

    assert_eq!(errors.get("title").map(String::as_str), Some(TITLE_MESSAGE));
    assert_eq!(errors.get("content").map(String::as_str), Some(CONTENT_MESSAGE));
}

#[test]
fn test_content_over_limit_rejected() {
    let errors = payload("Hello World", &"c".repeat(1001)).validate().unwrap_err();
    assert!(errors.contains_key("content"));
    assert!(!errors.contains_key("title"));
}

#[test]
fn test_missing_fields_deserialize_to_empty_and_fail_validation() {
    let parsed: PostPayload = serde_json::from_str(r#"{"content": "This is valid content."}"#)
        .expect("missing title should default");

    assert_eq!(parsed.title, "");
    let errors = parsed.validate().unwrap_err();
    assert!(errors.contains_key("title"));
}

#[test]
fn test_null_fields_behave_like_missing_ones() {
    let parsed: PostPayload =
        serde_json::from_str(r#"{"title": null, "content": "This is valid content."}"#)
            .expect("null title should default");
    assert_eq!(parsed.title, "");
    let errors = parsed.validate().unwrap_err();
    assert_eq!(errors.get("title").map(String::as_str), Some(TITLE_MESSAGE));

    let register: RegisterRequest =
        serde_json::from_str(r#"{"name": null, "email": null, "password": null}"#).unwrap();
    let errors = register.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
}

#[test]
fn test_char_length_counts_scalars_not_bytes() {
    // Four two-byte characters plus one.
    assert_eq!(char_length("ééééé"), 5);
    assert!(payload("ééééé", "0123456789").validate().is_ok());

    // Emoji presentation selectors do not count.
    assert_eq!(char_length("\u{2764}\u{FE0F}"), 1);
}

#[test]
fn test_email_shapes() {
    assert!(is_email("ada@example.com"));
    assert!(is_email("first.last@mail.example.org"));

    assert!(!is_email(""));
    assert!(!is_email("no-at-sign.com"));
    assert!(!is_email("@example.com"));
    assert!(!is_email("ada@localhost"));
    assert!(!is_email("ada@.com"));
    assert!(!is_email("ada@example."));
    assert!(!is_email("ada@@example.com"));
    assert!(!is_email("ada lovelace@example.com"));
}

#[test]
fn test_register_request_reports_every_bad_field() {
    let request = RegisterRequest {
        name: "A".to_string(),
        email: "nope".to_string(),
        password: "123".to_string(),
    };

    let errors = request.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.contains_key("name"));
    assert!(errors.contains_key("email"));
    assert!(errors.contains_key("password"));
}

#[test]
fn test_update_user_request_only_checks_present_fields() {
    assert!(UpdateUserRequest::default().validate().is_ok());

    let request = UpdateUserRequest {
        email: Some("broken".to_string()),
        ..UpdateUserRequest::default()
    };
    let errors = request.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_key("email"));
}

#[test]
fn test_update_user_request_optionality() {
    let partial = UpdateUserRequest {
        role: Some(Role::Admin),
        ..UpdateUserRequest::default()
    };

    let json_output = serde_json::to_string(&partial).unwrap();
    assert_eq!(json_output, r#"{"role":"admin"}"#);
}

#[test]
fn test_role_round_trips_as_lowercase_text() {
    assert_eq!(Role::try_from("admin".to_string()), Ok(Role::Admin));
    assert_eq!(Role::try_from("standard".to_string()), Ok(Role::Standard));
    assert!(Role::try_from("root".to_string()).is_err());
    assert_eq!(serde_json::to_string(&Role::Standard).unwrap(), r#""standard""#);
}

#[test]
fn test_user_profile_never_carries_password_hash() {
    let user = User {
        id: Uuid::new_v4(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password_hash: "$argon2id$v=19$secret".to_string(),
        role: Role::Standard,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let json_output = serde_json::to_string(&UserProfile::from(user)).unwrap();
    assert!(!json_output.contains("password"));
    assert!(!json_output.contains("argon2"));
    assert!(json_output.contains(r#""role":"standard""#));
}
