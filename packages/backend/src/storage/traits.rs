use async_trait::async_trait;
use bytes::Bytes;

use super::error::StorageError;

/// Path-addressed object storage with public URLs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` at `path`, replacing any existing object.
    async fn upload(&self, path: &str, data: Bytes, content_type: &str)
    -> Result<(), StorageError>;

    /// Remove the objects at `paths`. Paths that do not exist are skipped.
    async fn remove(&self, paths: &[String]) -> Result<(), StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// URL prefix under which objects are publicly readable, without a
    /// trailing slash.
    fn public_base_url(&self) -> &str;

    /// Public URL of the object at `path`.
    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url(), path)
    }

    /// Inverse of [`BlobStore::public_url`]. Returns `None` for URLs that do
    /// not point into this store.
    fn path_from_public_url(&self, url: &str) -> Option<String> {
        let prefix = format!("{}/", self.public_base_url());
        url.strip_prefix(&prefix)
            .filter(|path| !path.is_empty())
            .map(str::to_string)
    }
}
