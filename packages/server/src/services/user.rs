use backend::Backend;

use crate::models::user::{NewUser, User, UserChanges};

use super::ServiceResult;

const TABLE: &str = "users";
const NOT_FOUND: &str = "User tidak ditemukan";

pub async fn list(backend: &Backend) -> ServiceResult<Vec<User>> {
    super::list(backend, TABLE).await
}

pub async fn get(backend: &Backend, id: &str) -> ServiceResult<User> {
    super::get(backend, TABLE, id, NOT_FOUND).await
}

pub async fn create(backend: &Backend, user: &NewUser) -> ServiceResult<User> {
    super::create(backend, TABLE, user).await
}

pub async fn update(backend: &Backend, id: &str, changes: &UserChanges) -> ServiceResult<User> {
    super::update(backend, TABLE, id, changes, NOT_FOUND).await
}

pub async fn delete(backend: &Backend, id: &str) -> ServiceResult<()> {
    super::delete(backend, TABLE, id, NOT_FOUND).await
}
