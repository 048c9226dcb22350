use backend::Backend;

use crate::models::potong::{NewPotong, Potong, PotongChanges};

use super::ServiceResult;

const TABLE: &str = "potong";
const NOT_FOUND: &str = "Potong tidak ditemukan";

pub async fn list(backend: &Backend) -> ServiceResult<Vec<Potong>> {
    super::list(backend, TABLE).await
}

pub async fn get(backend: &Backend, id: &str) -> ServiceResult<Potong> {
    super::get(backend, TABLE, id, NOT_FOUND).await
}

pub async fn create(backend: &Backend, potong: &NewPotong) -> ServiceResult<Potong> {
    super::create(backend, TABLE, potong).await
}

pub async fn update(
    backend: &Backend,
    id: &str,
    changes: &PotongChanges,
) -> ServiceResult<Potong> {
    super::update(backend, TABLE, id, changes, NOT_FOUND).await
}

pub async fn delete(backend: &Backend, id: &str) -> ServiceResult<()> {
    super::delete(backend, TABLE, id, NOT_FOUND).await
}
