//! Backend parts that fail on demand, for exercising error responses.

use async_trait::async_trait;
use bytes::Bytes;

use backend::identity::MemoryIdentity;
use backend::table::MemoryTableStore;
use backend::{
    BackendError, BlobStore, Filter, Identity, IdentityProvider, Row, Session, StorageError,
    TableStore,
};

/// An upstream answer: status code and message.
pub type Failure = (u16, &'static str);

fn fail(failure: Failure) -> BackendError {
    BackendError::api(failure.0, failure.1)
}

/// In-memory tables where selected operations answer with an upstream error.
#[derive(Default)]
pub struct FaultyTables {
    inner: MemoryTableStore,
    pub list: Option<Failure>,
    pub lookup: Option<Failure>,
    pub insert: Option<Failure>,
}

impl FaultyTables {
    /// Fail unfiltered selects.
    pub fn failing_list(failure: Failure) -> Self {
        Self {
            list: Some(failure),
            ..Default::default()
        }
    }

    pub fn failing_lookup(failure: Failure) -> Self {
        Self {
            lookup: Some(failure),
            ..Default::default()
        }
    }

    pub fn failing_insert(failure: Failure) -> Self {
        Self {
            insert: Some(failure),
            ..Default::default()
        }
    }
}

#[async_trait]
impl TableStore for FaultyTables {
    async fn select(&self, table: &str, filter: Option<&Filter>) -> Result<Vec<Row>, BackendError> {
        let failure = if filter.is_some() { self.lookup } else { self.list };
        match failure {
            Some(failure) => Err(fail(failure)),
            None => self.inner.select(table, filter).await,
        }
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Row, BackendError> {
        match self.insert {
            Some(failure) => Err(fail(failure)),
            None => self.inner.insert(table, row).await,
        }
    }

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        changes: Row,
    ) -> Result<Vec<Row>, BackendError> {
        self.inner.update(table, filter, changes).await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, BackendError> {
        self.inner.delete(table, filter).await
    }
}

/// Blob store that accepts uploads but cannot remove anything.
pub struct UndeletableStorage {
    pub base_url: String,
}

#[async_trait]
impl BlobStore for UndeletableStorage {
    async fn upload(&self, _path: &str, _data: Bytes, _content_type: &str) -> Result<(), StorageError> {
        Ok(())
    }

    async fn remove(&self, _paths: &[String]) -> Result<(), StorageError> {
        Err(StorageError::Remote("storage unavailable".into()))
    }

    async fn exists(&self, _path: &str) -> Result<bool, StorageError> {
        Ok(true)
    }

    fn public_base_url(&self) -> &str {
        &self.base_url
    }
}

/// Identity service that signs in normally but cannot be asked about tokens.
#[derive(Default)]
pub struct UnreachableIdentity {
    inner: MemoryIdentity,
}

#[async_trait]
impl IdentityProvider for UnreachableIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        self.inner.sign_up(email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        self.inner.sign_in(email, password).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        self.inner.sign_out(access_token).await
    }

    async fn get_user(&self, _access_token: &str) -> Result<Option<Identity>, BackendError> {
        Err(BackendError::api(503, "identity service unavailable"))
    }
}
