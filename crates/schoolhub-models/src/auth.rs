//! Authentication models: login, session payload, and password change.

use schoolhub_core::validation::{error, not_blank};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::users::User;

/// Login request with email and password.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

/// Successful login: the account and its bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Change-password form.
///
/// Only the current and new passwords are sent; the confirmation is a
/// client-side check.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_password_change"))]
pub struct ChangePasswordRequest {
    #[validate(custom(function = "not_blank"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
    #[serde(skip_serializing, default)]
    pub confirm_password: String,
}

impl ChangePasswordRequest {
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }
}

fn validate_password_change(form: &ChangePasswordRequest) -> Result<(), ValidationError> {
    if form.confirm_password != form.new_password {
        return Err(error("confirm_password", "Passwords do not match"));
    }
    if form.new_password == form.current_password {
        return Err(error(
            "new_password",
            "New password must be different from current password",
        ));
    }
    Ok(())
}

/// Generic `{ "message": "..." }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
