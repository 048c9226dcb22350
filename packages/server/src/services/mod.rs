//! Row-level operations per entity. Each function is one or two round trips
//! to the table store; existence is checked before updates and deletes so a
//! missing row is reported apart from a backend failure.

pub mod auth;
pub mod bumbu;
pub mod content;
pub mod potong;
pub mod user;

use backend::{Backend, BackendError, Row};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

async fn list<T: DeserializeOwned>(backend: &Backend, table: &str) -> ServiceResult<Vec<T>> {
    Ok(backend.table(table).select().await?)
}

/// Row with the given id. The REST gateway answers 400 when `id` cannot be
/// cast to the key column's type; such an id names no row.
async fn find_by_id<T: DeserializeOwned>(
    backend: &Backend,
    table: &str,
    id: &str,
) -> ServiceResult<Option<T>> {
    match backend.table(table).find_eq("id", id).await {
        Err(BackendError::Api { status: 400, message }) => {
            tracing::debug!(table, id, %message, "Id rejected by the table store");
            Ok(None)
        }
        found => Ok(found?),
    }
}

async fn get<T: DeserializeOwned>(
    backend: &Backend,
    table: &str,
    id: &str,
    not_found: &str,
) -> ServiceResult<T> {
    find_by_id(backend, table, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(not_found.to_string()))
}

async fn create<T: Serialize, R: DeserializeOwned>(
    backend: &Backend,
    table: &str,
    values: &T,
) -> ServiceResult<R> {
    Ok(backend.table(table).insert(values).await?)
}

async fn ensure_exists(
    backend: &Backend,
    table: &str,
    id: &str,
    not_found: &str,
) -> ServiceResult<()> {
    match find_by_id::<Row>(backend, table, id).await? {
        Some(_) => Ok(()),
        None => Err(ServiceError::NotFound(not_found.to_string())),
    }
}

async fn update<T: Serialize, R: DeserializeOwned>(
    backend: &Backend,
    table: &str,
    id: &str,
    changes: &T,
    not_found: &str,
) -> ServiceResult<R> {
    ensure_exists(backend, table, id, not_found).await?;
    backend
        .table(table)
        .update_eq("id", id, changes)
        .await?
        // Deleted between the existence check and the write.
        .ok_or_else(|| ServiceError::NotFound(not_found.to_string()))
}

async fn delete(backend: &Backend, table: &str, id: &str, not_found: &str) -> ServiceResult<()> {
    ensure_exists(backend, table, id, not_found).await?;
    backend.table(table).delete_eq("id", id).await?;
    Ok(())
}
