use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::*;
use crate::models::shared::{Meta, ResultResponse};
use crate::services;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    operation_id = "signUp",
    summary = "Register an account",
    description = "Creates an account with the identity service. Depending on the project \
        settings the account may need email confirmation before it can sign in.",
    request_body = AuthRequest,
    responses(
        (status = 201, description = "Account registered", body = ResultResponse<AuthMessage>),
        (status = 400, description = "Invalid credentials shape or rejected by the identity service", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn sign_up(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AuthRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = validate_auth_request(&payload)?;
    let result = services::auth::sign_up(&state.backend, &email, &payload.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResultResponse {
            meta: Meta::new(StatusCode::CREATED, "Registrasi berhasil"),
            result,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/signin",
    tag = "Auth",
    operation_id = "signIn",
    summary = "Sign in with email and password",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Signed in; `result.token` is the bearer token", body = ResultResponse<SignInResult>),
        (status = 400, description = "Invalid credentials", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn sign_in(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AuthRequest>,
) -> Result<Json<ResultResponse<SignInResult>>, AppError> {
    let email = validate_auth_request(&payload)?;
    let result = services::auth::sign_in(&state.backend, &email, &payload.password).await?;

    Ok(Json(ResultResponse {
        meta: Meta::new(StatusCode::OK, "Login Berhasil"),
        result,
    }))
}

#[utoipa::path(
    post,
    path = "/signout",
    tag = "Auth",
    operation_id = "signOut",
    summary = "Revoke the current session",
    responses(
        (status = 200, description = "Signed out", body = ResultResponse<AuthMessage>),
        (status = 400, description = "Rejected by the identity service", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn sign_out(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ResultResponse<AuthMessage>>, AppError> {
    let result = services::auth::sign_out(&state.backend, &auth_user.token).await?;

    Ok(Json(ResultResponse {
        meta: Meta::new(StatusCode::OK, "Logout Berhasil"),
        result,
    }))
}
