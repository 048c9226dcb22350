use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use backend::BackendError;
use serde::Serialize;

use crate::services::ServiceError;
use crate::utils::image::ImageError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    #[schema(example = false)]
    pub status: bool,
    /// HTTP status code, repeated in the body.
    #[serde(rename = "statusCode")]
    #[schema(example = 400)]
    pub status_code: u16,
    /// Human-readable error description.
    #[schema(example = "Nama wajib diisi")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    NotFound(String),
    /// The managed backend rejected a write or an auth call; its message is
    /// passed through.
    Backend(String),
    /// The managed backend failed on a read or a storage call; its message is
    /// passed through.
    Upstream(String),
    Internal(String),
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                "Token diperlukan untuk mengakses resource ini".into(),
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                "Token tidak valid atau sudah kedaluwarsa".into(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Backend(msg) => {
                tracing::warn!("Backend rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Terjadi kesalahan pada server".into(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = ErrorBody {
            status: false,
            status_code: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Unclassified backend failures surface as a 400 with the backend's message.
/// Call sites that need a different status map the error themselves.
impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        AppError::Backend(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => AppError::NotFound(msg),
            ServiceError::Backend(e) => AppError::from(e),
        }
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        if err.is_client_error() {
            AppError::Validation(err.to_string())
        } else {
            AppError::Upstream(err.to_string())
        }
    }
}

impl ServiceError {
    /// Map a failed read: absent rows stay 404, backend failures become 500.
    pub fn on_read(self) -> AppError {
        match self {
            ServiceError::NotFound(msg) => AppError::NotFound(msg),
            ServiceError::Backend(e) => AppError::Upstream(e.to_string()),
        }
    }
}
