use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::multipart::MultipartForm;

use super::shared::{Meta, RecordId, optional_text, required_text, whole_number};

/// A seasoning product as stored in the `bumbu` table.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Bumbu {
    pub id: RecordId,
    #[schema(example = "Bumbu Rendang")]
    pub nama: String,
    #[serde(default)]
    #[schema(example = "Bumbu rendang khas Padang")]
    pub deskripsi: String,
    /// Price in rupiah.
    #[schema(example = 25000)]
    pub harga: i64,
    /// Public URL of the product image.
    #[serde(default)]
    pub gambar: String,
}

#[derive(Debug, Serialize)]
pub struct NewBumbu {
    pub nama: String,
    pub deskripsi: String,
    pub harga: i64,
    pub gambar: String,
}

/// Columns to overwrite on update; absent fields keep their stored value.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct BumbuChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harga: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gambar: Option<String>,
}

/// Validated text fields of a create request; the image comes separately.
#[derive(Debug, PartialEq)]
pub struct BumbuFields {
    pub nama: String,
    pub deskripsi: String,
    pub harga: i64,
}

impl BumbuFields {
    pub fn with_image(self, gambar: String) -> NewBumbu {
        NewBumbu {
            nama: self.nama,
            deskripsi: self.deskripsi,
            harga: self.harga,
            gambar,
        }
    }
}

pub fn validate_create_bumbu(form: &MultipartForm) -> Result<BumbuFields, AppError> {
    let nama = required_text(form.text("nama"), "Nama")?;
    let deskripsi = required_text(form.text("deskripsi"), "Deskripsi")?;
    let harga = required_text(form.text("harga"), "Harga")?;
    let harga = whole_number(&harga, "Harga")?;
    Ok(BumbuFields {
        nama,
        deskripsi,
        harga,
    })
}

pub fn validate_update_bumbu(form: &MultipartForm) -> Result<BumbuChanges, AppError> {
    let harga = optional_text(form.text("harga"), "Harga")?
        .map(|h| whole_number(&h, "Harga"))
        .transpose()?;
    Ok(BumbuChanges {
        nama: optional_text(form.text("nama"), "Nama")?,
        deskripsi: optional_text(form.text("deskripsi"), "Deskripsi")?,
        harga,
        gambar: None,
    })
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BumbuCreatedResponse {
    #[serde(flatten)]
    pub meta: Meta,
    #[serde(rename = "newBumbu")]
    pub new_bumbu: Bumbu,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BumbuUpdatedResponse {
    #[serde(flatten)]
    pub meta: Meta,
    #[serde(rename = "updateBumbu")]
    pub update_bumbu: Bumbu,
}
