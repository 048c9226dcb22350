use std::fmt;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Row id as produced by the table store: numeric for serial columns,
/// textual for uuid columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

/// Fields shared by every success body.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Meta {
    /// Always `true`.
    #[schema(example = true)]
    pub status: bool,
    /// HTTP status code, repeated in the body.
    #[serde(rename = "statusCode")]
    #[schema(example = 200)]
    pub status_code: u16,
    #[schema(example = "Success get all bumbu")]
    pub message: String,
}

impl Meta {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: true,
            status_code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Success body carrying its payload under `data`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DataResponse<T> {
    #[serde(flatten)]
    pub meta: Meta,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            meta: Meta::new(StatusCode::OK, message),
            data,
        }
    }
}

/// Success body carrying its payload under `result`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ResultResponse<T> {
    #[serde(flatten)]
    pub meta: Meta,
    pub result: T,
}

/// A text field that must be sent and must not be blank. Returns it trimmed.
pub fn required_text(value: Option<&str>, label: &str) -> Result<String, AppError> {
    match value {
        None => Err(AppError::Validation(format!("{label} wajib diisi"))),
        Some(v) => non_blank(v, label),
    }
}

/// A text field that may be omitted but must not be blank when sent.
pub fn optional_text(value: Option<&str>, label: &str) -> Result<Option<String>, AppError> {
    value.map(|v| non_blank(v, label)).transpose()
}

fn non_blank(value: &str, label: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{label} tidak boleh kosong")));
    }
    Ok(trimmed.to_string())
}

/// Parse a plain digit string (`^\d+$`) into a non-negative integer.
pub fn whole_number(value: &str, label: &str) -> Result<i64, AppError> {
    let invalid =
        || AppError::Validation(format!("{label} harus berupa angka bulat dan tidak boleh negatif"));

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}
