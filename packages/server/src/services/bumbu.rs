use backend::Backend;

use crate::models::bumbu::{Bumbu, BumbuChanges, NewBumbu};

use super::ServiceResult;

const TABLE: &str = "bumbu";
const NOT_FOUND: &str = "Bumbu tidak ditemukan";

pub async fn list(backend: &Backend) -> ServiceResult<Vec<Bumbu>> {
    super::list(backend, TABLE).await
}

pub async fn get(backend: &Backend, id: &str) -> ServiceResult<Bumbu> {
    super::get(backend, TABLE, id, NOT_FOUND).await
}

pub async fn create(backend: &Backend, bumbu: &NewBumbu) -> ServiceResult<Bumbu> {
    super::create(backend, TABLE, bumbu).await
}

pub async fn update(backend: &Backend, id: &str, changes: &BumbuChanges) -> ServiceResult<Bumbu> {
    super::update(backend, TABLE, id, changes, NOT_FOUND).await
}

pub async fn delete(backend: &Backend, id: &str) -> ServiceResult<()> {
    super::delete(backend, TABLE, id, NOT_FOUND).await
}
