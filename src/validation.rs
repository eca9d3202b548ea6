//! Input validation for request payloads.
//!
//! Every validator collects all failing fields at once and returns them as a
//! field -> message map, which becomes the body of a 400 response.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::models::{PostPayload, RegisterRequest, UpdateUserRequest};

pub type FieldErrors = BTreeMap<String, String>;

pub const TITLE_LENGTH: RangeInclusive<usize> = 5..=100;
pub const CONTENT_LENGTH: RangeInclusive<usize> = 10..=1000;
pub const NAME_LENGTH: RangeInclusive<usize> = 2..=30;
pub const PASSWORD_LENGTH: RangeInclusive<usize> = 6..=30;

pub const TITLE_MESSAGE: &str = "Title must be between 5 and 100 characters.";
pub const CONTENT_MESSAGE: &str = "Content must be between 10 and 1000 characters.";
pub const NAME_MESSAGE: &str = "Name must be between 2 and 30 characters.";
pub const EMAIL_MESSAGE: &str = "Email is invalid.";
pub const PASSWORD_MESSAGE: &str = "Password must be between 6 and 30 characters.";

/// Counts characters as a user perceives them in the simple case: Unicode scalar
/// values, not bytes, with emoji presentation selectors (U+FE0E, U+FE0F) ignored.
pub fn char_length(value: &str) -> usize {
    value
        .chars()
        .filter(|c| !matches!(c, '\u{FE0E}' | '\u{FE0F}'))
        .count()
}

fn length_in(value: &str, range: &RangeInclusive<usize>) -> bool {
    range.contains(&char_length(value))
}

/// Accepts `local@domain.tld` shapes: exactly one `@`, a non-empty local part,
/// and a domain with an interior dot. No whitespace anywhere.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

fn finish(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

impl PostPayload {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !length_in(&self.title, &TITLE_LENGTH) {
            errors.insert("title".into(), TITLE_MESSAGE.into());
        }
        if !length_in(&self.content, &CONTENT_LENGTH) {
            errors.insert("content".into(), CONTENT_MESSAGE.into());
        }
        finish(errors)
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !length_in(self.name.trim(), &NAME_LENGTH) {
            errors.insert("name".into(), NAME_MESSAGE.into());
        }
        if !is_email(&self.email) {
            errors.insert("email".into(), EMAIL_MESSAGE.into());
        }
        if !length_in(&self.password, &PASSWORD_LENGTH) {
            errors.insert("password".into(), PASSWORD_MESSAGE.into());
        }
        finish(errors)
    }
}

impl UpdateUserRequest {
    /// Same rules as registration, applied only to the fields present.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            if !length_in(name.trim(), &NAME_LENGTH) {
                errors.insert("name".into(), NAME_MESSAGE.into());
            }
        }
        if let Some(email) = &self.email {
            if !is_email(email) {
                errors.insert("email".into(), EMAIL_MESSAGE.into());
            }
        }
        if let Some(password) = &self.password {
            if !length_in(password, &PASSWORD_LENGTH) {
                errors.insert("password".into(), PASSWORD_MESSAGE.into());
            }
        }
        finish(errors)
    }
}
