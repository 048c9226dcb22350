use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::state::AppState;

/// Caller identity resolved from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication. The token is
/// checked against the identity service on every request.
#[derive(Debug)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
    /// The raw access token, needed to end the session on sign-out.
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::TokenInvalid)?;

        let identity = state
            .backend
            .identity()
            .get_user(token)
            .await
            .map_err(|e| AppError::Internal(format!("Token verification failed: {e}")))?
            .ok_or(AppError::TokenInvalid)?;

        tracing::debug!(user_id = %identity.id, "Request authenticated");

        Ok(AuthUser {
            user_id: identity.id,
            email: identity.email,
            token: token.to_string(),
        })
    }
}
