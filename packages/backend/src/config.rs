use std::path::PathBuf;

use serde::Deserialize;

use crate::error::BackendError;

/// Which implementation backs tables and identity.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Hosted Supabase project (PostgREST + GoTrue).
    #[default]
    Supabase,
    /// In-process stores, for local development and tests.
    Memory,
}

/// Which implementation backs blob storage.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    /// S3-compatible endpoint of the storage service.
    #[default]
    S3,
    /// Local directory.
    Filesystem,
}

/// Credentials for the S3-compatible storage endpoint.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct S3Config {
    /// e.g. `https://<project>.supabase.co/storage/v1/s3`.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
}

fn default_region() -> String {
    "us-east-1".into()
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub provider: StorageProvider,
    /// Bucket that holds every uploaded image. Default: "dagingue-api".
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Prefix of public object URLs. When absent for S3 it is derived as
    /// `{url}/storage/v1/object/public/{bucket}`. The filesystem store has no
    /// address of its own, so it must be given one.
    #[serde(default)]
    pub public_url: Option<String>,
    /// Root directory of the filesystem store. Default: "./uploads".
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Maximum accepted object size in bytes. Default: 10 MiB.
    #[serde(default = "default_max_size")]
    pub max_size: u64,
    #[serde(default)]
    pub s3: S3Config,
}

fn default_bucket() -> String {
    "dagingue-api".into()
}
fn default_root() -> PathBuf {
    PathBuf::from("./uploads")
}
fn default_max_size() -> u64 {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::default(),
            bucket: default_bucket(),
            public_url: None,
            root: default_root(),
            max_size: default_max_size(),
            s3: S3Config::default(),
        }
    }
}

/// Connection settings for the managed backend.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default)]
    pub provider: Provider,
    /// Project URL, e.g. `https://<project>.supabase.co`.
    #[serde(default)]
    pub url: String,
    /// Service-role key used for table access.
    #[serde(default)]
    pub service_key: String,
    /// Public anon key used for identity calls.
    #[serde(default)]
    pub anon_key: String,
    /// Per-request timeout for outbound HTTP calls. Default: 30.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            url: String::new(),
            service_key: String::new(),
            anon_key: String::new(),
            timeout_secs: default_timeout_secs(),
            storage: StorageConfig::default(),
        }
    }
}

impl BackendConfig {
    /// Public URL prefix for stored objects, without a trailing slash.
    pub fn public_storage_url(&self) -> Result<String, BackendError> {
        if let Some(url) = &self.storage.public_url {
            return Ok(url.trim_end_matches('/').to_string());
        }
        match self.storage.provider {
            StorageProvider::S3 => Ok(format!(
                "{}/storage/v1/object/public/{}",
                self.url.trim_end_matches('/'),
                self.storage.bucket
            )),
            StorageProvider::Filesystem => Err(BackendError::Config(
                "storage.public_url must be set for the filesystem store".into(),
            )),
        }
    }
}
