//! Field rules shared by the resource schemas.

use std::sync::LazyLock;

use mongodb::bson::oid::ObjectId;
use regex::Regex;

use crate::error::ApiError;

/// Local part (dotted atoms or a quoted string) `@` domain (bracketed IPv4 or
/// dotted labels ending in a 2+ letter TLD).
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Fail with a validation error when `value` is empty.
pub fn required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{field}: field is required")));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), ApiError> {
    required(field, value)?;
    if !is_valid_email(value) {
        return Err(ApiError::Validation(format!(
            "{field}: `{value}` is not a valid email address"
        )));
    }
    Ok(())
}

/// Parse a reference to another entity.
pub fn object_id(field: &str, value: &str) -> Result<ObjectId, ApiError> {
    required(field, value)?;
    ObjectId::parse_str(value)
        .map_err(|_| ApiError::Validation(format!("{field}: `{value}` is not a valid id")))
}
