use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::shared::{Meta, RecordId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// A row of the `users` table. The stored password is never read back.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct User {
    pub id: RecordId,
    #[schema(example = "budi")]
    pub username: String,
    #[schema(example = "budi@example.com")]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "budi")]
    pub username: String,
    #[schema(example = "budi@example.com")]
    pub email: String,
    #[schema(example = "rahasia123")]
    pub password: String,
    /// Defaults to `user`.
    pub role: Option<Role>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(flatten)]
    pub meta: Meta,
    pub user: User,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserListResponse {
    #[serde(flatten)]
    pub meta: Meta,
    pub users: Vec<User>,
}

fn check_username(username: &str) -> Result<String, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Username tidak boleh kosong".into()));
    }
    Ok(username.to_string())
}

pub(crate) fn check_email(email: &str) -> Result<String, AppError> {
    let email = email.trim();
    if !EmailAddress::is_valid(email) {
        return Err(AppError::Validation("Email tidak valid".into()));
    }
    Ok(email.to_string())
}

pub(crate) fn check_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < 6 {
        return Err(AppError::Validation("Password minimal 6 karakter".into()));
    }
    Ok(())
}

pub fn validate_create_user(payload: CreateUserRequest) -> Result<NewUser, AppError> {
    let username = check_username(&payload.username)?;
    let email = check_email(&payload.email)?;
    check_password(&payload.password)?;
    Ok(NewUser {
        username,
        email,
        password: payload.password,
        role: payload.role.unwrap_or_default(),
    })
}

pub fn validate_update_user(payload: UpdateUserRequest) -> Result<UserChanges, AppError> {
    if let Some(password) = &payload.password {
        check_password(password)?;
    }
    Ok(UserChanges {
        username: payload.username.as_deref().map(check_username).transpose()?,
        email: payload.email.as_deref().map(check_email).transpose()?,
        password: payload.password,
        role: payload.role,
    })
}
