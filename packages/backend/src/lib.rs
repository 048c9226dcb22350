//! Client side of the managed backend: table rows, image objects and user
//! identities. Each concern sits behind a trait so the HTTP layer can run
//! against the hosted service or against in-process stand-ins.

pub mod config;
pub mod error;
pub mod identity;
pub mod storage;
pub mod table;

use std::sync::Arc;
use std::time::Duration;

pub use config::{BackendConfig, Provider, StorageProvider};
pub use error::BackendError;
pub use identity::{Identity, IdentityProvider, Session};
pub use storage::{BlobStore, StorageError};
pub use table::{Filter, Row, Table, TableStore};

use identity::{GoTrueClient, MemoryIdentity};
use storage::filesystem::FilesystemBlobStore;
use table::{MemoryTableStore, PostgrestClient};

/// Bundle of the three backend services, cheap to clone.
#[derive(Clone)]
pub struct Backend {
    tables: Arc<dyn TableStore>,
    storage: Arc<dyn BlobStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl Backend {
    pub fn new(
        tables: Arc<dyn TableStore>,
        storage: Arc<dyn BlobStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            tables,
            storage,
            identity,
        }
    }

    /// Build the clients described by `config`.
    pub async fn connect(config: &BackendConfig) -> Result<Self, BackendError> {
        let storage = build_storage(config).await?;

        let (tables, identity): (Arc<dyn TableStore>, Arc<dyn IdentityProvider>) =
            match config.provider {
                Provider::Supabase => {
                    if config.url.is_empty() || config.service_key.is_empty() {
                        return Err(BackendError::Config(
                            "backend.url and backend.service_key must be set".into(),
                        ));
                    }
                    let http = reqwest::Client::builder()
                        .timeout(Duration::from_secs(config.timeout_secs))
                        .build()?;
                    let anon_key = if config.anon_key.is_empty() {
                        &config.service_key
                    } else {
                        &config.anon_key
                    };
                    (
                        Arc::new(PostgrestClient::new(
                            http.clone(),
                            &config.url,
                            &config.service_key,
                        )),
                        Arc::new(GoTrueClient::new(http, &config.url, anon_key)),
                    )
                }
                Provider::Memory => (
                    Arc::new(MemoryTableStore::new().with_unique("landing_page", "key")),
                    Arc::new(MemoryIdentity::new()),
                ),
            };

        Ok(Self::new(tables, storage, identity))
    }

    pub fn table<'a>(&'a self, name: &'a str) -> Table<'a> {
        Table::new(self.tables.as_ref(), name)
    }

    pub fn storage(&self) -> &dyn BlobStore {
        self.storage.as_ref()
    }

    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    /// Check that the table store answers for `table`.
    pub async fn probe(&self, table: &str) -> Result<(), BackendError> {
        self.tables.probe(table).await
    }
}

async fn build_storage(config: &BackendConfig) -> Result<Arc<dyn BlobStore>, BackendError> {
    match config.storage.provider {
        StorageProvider::Filesystem => Ok(Arc::new(
            FilesystemBlobStore::new(
                config.storage.root.clone(),
                config.public_storage_url()?,
                config.storage.max_size,
            )
            .await?,
        )),
        #[cfg(feature = "object-storage")]
        StorageProvider::S3 => Ok(Arc::new(storage::s3::S3BlobStore::new(config)?)),
        #[cfg(not(feature = "object-storage"))]
        StorageProvider::S3 => Err(BackendError::Config(
            "S3 storage requires the `object-storage` feature".into(),
        )),
    }
}
