use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::user::{check_email, check_password};

/// Credentials for sign-up and sign-in.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AuthRequest {
    #[schema(example = "admin@dagingue.id")]
    pub email: String,
    /// At least 6 characters.
    #[schema(example = "rahasia123")]
    pub password: String,
}

/// Check the credential shape and return the trimmed email.
pub fn validate_auth_request(payload: &AuthRequest) -> Result<String, AppError> {
    let email = check_email(&payload.email)?;
    check_password(&payload.password)?;
    Ok(email)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AuthMessage {
    #[schema(example = "Logout Berhasil")]
    pub message: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SignInResult {
    #[schema(example = "Login Berhasil")]
    pub message: String,
    /// Bearer token for the gated endpoints.
    pub token: String,
    pub email: Option<String>,
}
