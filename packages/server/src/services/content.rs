use backend::Backend;

use crate::models::content::{LandingPageEntry, LandingPageValue, NewLandingPageEntry};

use super::{ServiceError, ServiceResult};

const TABLE: &str = "landing_page";

fn not_found(key: &str) -> ServiceError {
    ServiceError::NotFound(format!("Data dengan key '{key}' tidak ditemukan"))
}

pub async fn list(backend: &Backend) -> ServiceResult<Vec<LandingPageEntry>> {
    super::list(backend, TABLE).await
}

/// The entry stored under `key`, if any.
pub async fn find_by_key(backend: &Backend, key: &str) -> ServiceResult<Option<LandingPageEntry>> {
    Ok(backend.table(TABLE).find_eq("key", key).await?)
}

pub async fn get_by_key(backend: &Backend, key: &str) -> ServiceResult<LandingPageEntry> {
    find_by_key(backend, key).await?.ok_or_else(|| not_found(key))
}

pub async fn create(backend: &Backend, key: &str, value: &str) -> ServiceResult<LandingPageEntry> {
    super::create(backend, TABLE, &NewLandingPageEntry { key, value }).await
}

pub async fn update_by_key(
    backend: &Backend,
    key: &str,
    value: &str,
) -> ServiceResult<LandingPageEntry> {
    backend
        .table(TABLE)
        .update_eq("key", key, &LandingPageValue { value })
        .await?
        .ok_or_else(|| not_found(key))
}

pub async fn delete_by_key(backend: &Backend, key: &str) -> ServiceResult<()> {
    match backend.table(TABLE).delete_eq("key", key).await? {
        0 => Err(not_found(key)),
        _ => Ok(()),
    }
}
