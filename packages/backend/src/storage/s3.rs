use async_trait::async_trait;
use bytes::Bytes;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;

use super::error::StorageError;
use super::traits::BlobStore;
use crate::config::{BackendConfig, S3Config};

/// Object store speaking the S3 protocol, pointed at the managed backend's
/// S3-compatible storage endpoint.
pub struct S3BlobStore {
    bucket: Box<Bucket>,
    public_base_url: String,
    max_size: u64,
}

impl S3BlobStore {
    pub fn new(config: &BackendConfig) -> Result<Self, StorageError> {
        let S3Config {
            endpoint,
            region,
            access_key,
            secret_key,
        } = &config.storage.s3;

        if endpoint.is_empty() {
            return Err(StorageError::Remote(
                "storage.s3.endpoint must be set".into(),
            ));
        }

        let region = Region::Custom {
            region: region.clone(),
            endpoint: endpoint.clone(),
        };
        let credentials = Credentials::new(
            Some(access_key.as_str()),
            Some(secret_key.as_str()),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Remote(format!("invalid storage credentials: {e}")))?;

        let bucket = Bucket::new(&config.storage.bucket, region, credentials)
            .map_err(|e| StorageError::Remote(e.to_string()))?
            .with_path_style();

        let public_base_url = config
            .public_storage_url()
            .map_err(|e| StorageError::Remote(e.to_string()))?;

        Ok(Self {
            bucket,
            public_base_url,
            max_size: config.storage.max_size,
        })
    }
}

fn check_status(code: u16, action: &str, path: &str) -> Result<(), StorageError> {
    if (200..300).contains(&code) {
        Ok(())
    } else {
        Err(StorageError::Remote(format!(
            "{action} '{path}' failed with status {code}"
        )))
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let response = self
            .bucket
            .put_object_with_content_type(path, &data, content_type)
            .await
            .map_err(|e| StorageError::Remote(e.to_string()))?;
        check_status(response.status_code(), "upload", path)
    }

    async fn remove(&self, paths: &[String]) -> Result<(), StorageError> {
        for path in paths {
            let response = self
                .bucket
                .delete_object(path)
                .await
                .map_err(|e| StorageError::Remote(e.to_string()))?;
            // S3 answers 204 for deletes, including of absent keys.
            check_status(response.status_code(), "delete", path)?;
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        match self.bucket.head_object(path).await {
            Ok((_, code)) => Ok((200..300).contains(&code)),
            Err(s3::error::S3Error::HttpFailWithBody(404, _)) => Ok(false),
            Err(e) => Err(StorageError::Remote(e.to_string())),
        }
    }

    fn public_base_url(&self) -> &str {
        &self.public_base_url
    }
}
