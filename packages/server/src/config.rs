use backend::{BackendConfig, StorageProvider};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty allows any origin.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
    /// Maximum request body size in bytes (multipart uploads included).
    pub upload_limit: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("DAGINGUE_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("server.upload_limit", 10 * 1024 * 1024)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            // Load from config/config.toml
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., DAGINGUE__BACKEND__SERVICE_KEY)
            .add_source(
                Environment::with_prefix("DAGINGUE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = s.try_deserialize()?;
        fill_upload_url(&config.server, &mut config.backend);
        Ok(config)
    }
}

/// The filesystem store serves objects from this server under `/uploads`,
/// so its public prefix follows the listen address unless set explicitly.
fn fill_upload_url(server: &ServerConfig, backend: &mut BackendConfig) {
    let storage = &mut backend.storage;
    if storage.provider != StorageProvider::Filesystem || storage.public_url.is_some() {
        return;
    }
    let host = match server.host.as_str() {
        "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
        host => host,
    };
    storage.public_url = Some(format!("http://{host}:{}/uploads", server.port));
}
