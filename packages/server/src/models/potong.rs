use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::multipart::MultipartForm;

use super::shared::{Meta, RecordId, optional_text, required_text};

/// A meat cut as stored in the `potong` table.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Potong {
    pub id: RecordId,
    #[schema(example = "Has Dalam")]
    pub nama: String,
    /// Free-form weight label.
    #[schema(example = "500 gr")]
    pub berat: String,
    #[serde(default)]
    pub gambar: String,
}

#[derive(Debug, Serialize)]
pub struct NewPotong {
    pub nama: String,
    pub berat: String,
    pub gambar: String,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct PotongChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub berat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gambar: Option<String>,
}

pub fn validate_create_potong(form: &MultipartForm) -> Result<(String, String), AppError> {
    let nama = required_text(form.text("nama"), "Nama")?;
    let berat = required_text(form.text("berat"), "Berat")?;
    Ok((nama, berat))
}

pub fn validate_update_potong(form: &MultipartForm) -> Result<PotongChanges, AppError> {
    Ok(PotongChanges {
        nama: optional_text(form.text("nama"), "Nama")?,
        berat: optional_text(form.text("berat"), "Berat")?,
        gambar: None,
    })
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PotongCreatedResponse {
    #[serde(flatten)]
    pub meta: Meta,
    #[serde(rename = "newPotong")]
    pub new_potong: Potong,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PotongUpdatedResponse {
    #[serde(flatten)]
    pub meta: Meta,
    #[serde(rename = "updatePotong")]
    pub update_potong: Potong,
}
