use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::multipart::MultipartForm;

use super::shared::{Meta, RecordId};

/// The fixed set of landing-page slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKey {
    LogoImage,
    HeroImage,
    Img1,
    Img2,
    BannerProduct,
    BannerFooter,
    AboutUs,
    SocialWhatsapp,
    SocialInstagram,
    SocialShopee,
}

impl ContentKey {
    pub const ALL: [ContentKey; 10] = [
        ContentKey::LogoImage,
        ContentKey::HeroImage,
        ContentKey::Img1,
        ContentKey::Img2,
        ContentKey::BannerProduct,
        ContentKey::BannerFooter,
        ContentKey::AboutUs,
        ContentKey::SocialWhatsapp,
        ContentKey::SocialInstagram,
        ContentKey::SocialShopee,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKey::LogoImage => "logo_image",
            ContentKey::HeroImage => "hero_image",
            ContentKey::Img1 => "img_1",
            ContentKey::Img2 => "img_2",
            ContentKey::BannerProduct => "banner_product",
            ContentKey::BannerFooter => "banner_footer",
            ContentKey::AboutUs => "about_us",
            ContentKey::SocialWhatsapp => "social_whatsapp",
            ContentKey::SocialInstagram => "social_instagram",
            ContentKey::SocialShopee => "social_shopee",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Image slots store a JSON array of public URLs as their value.
    pub fn is_image(self) -> bool {
        matches!(
            self,
            ContentKey::LogoImage
                | ContentKey::HeroImage
                | ContentKey::Img1
                | ContentKey::Img2
                | ContentKey::BannerProduct
                | ContentKey::BannerFooter
        )
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `landing_page` table.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LandingPageEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[schema(example = "hero_image")]
    pub key: String,
    /// Plain text, or a JSON-encoded array of image URLs for image slots.
    #[schema(example = "[\"https://example.supabase.co/storage/v1/object/public/dagingue-api/landing_page/1700000000000-hero.png\"]")]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct NewLandingPageEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LandingPageValue<'a> {
    pub value: &'a str,
}

/// One validated item of a batch write.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub key: ContentKey,
    pub value: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentBatchResponse {
    #[serde(flatten)]
    pub meta: Meta,
    #[serde(rename = "processedData")]
    pub processed_data: Vec<LandingPageEntry>,
}

/// Parse and check the `data` field of a batch write: a non-empty JSON
/// array of `{key, value}` objects over distinct known keys. Uploaded files
/// may only target image keys.
pub fn parse_content_batch(form: &MultipartForm) -> Result<Vec<ContentItem>, AppError> {
    let not_array =
        || AppError::Validation("Data must be an array with at least one item".into());

    let raw = form.text("data").ok_or_else(not_array)?;
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(not_array()),
    };

    let mut seen = HashSet::new();
    let mut batch = Vec::with_capacity(items.len());
    for item in items {
        let (key, value) = item_parts(&item).ok_or_else(|| {
            AppError::Validation("Setiap item harus memiliki 'key' dan 'value'".into())
        })?;

        let key = ContentKey::parse(key)
            .ok_or_else(|| AppError::Validation(format!("Key '{key}' tidak valid")))?;
        if !seen.insert(key) {
            return Err(AppError::Validation(format!(
                "Key '{key}' muncul lebih dari sekali"
            )));
        }

        batch.push(ContentItem { key, value });
    }

    for field in form.file_fields() {
        if let Some(key) = ContentKey::parse(field)
            && !key.is_image()
        {
            return Err(AppError::Validation(format!(
                "Key '{key}' tidak menerima file gambar"
            )));
        }
    }

    Ok(batch)
}

fn item_parts(item: &Value) -> Option<(&str, String)> {
    let key = item.get("key")?.as_str().filter(|k| !k.is_empty())?;
    let value = match item.get("value")? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some((key, value))
}

/// Image URLs held by a stored value: a JSON array of strings, a JSON
/// string, or a bare URL.
pub fn stored_image_urls(value: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(value) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        Ok(Value::String(s)) if !s.is_empty() => vec![s],
        Ok(_) => Vec::new(),
        Err(_) if !value.trim().is_empty() => vec![value.trim().to_string()],
        Err(_) => Vec::new(),
    }
}
