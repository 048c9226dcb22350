pub mod faults;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use tempfile::TempDir;

use backend::config::StorageConfig;
use backend::identity::MemoryIdentity;
use backend::storage::filesystem::FilesystemBlobStore;
use backend::table::MemoryTableStore;
use backend::{
    Backend, BackendConfig, BlobStore, IdentityProvider, Provider, StorageProvider, TableStore,
};
use server::config::{AppConfig, CorsConfig, LogConfig, LogFormat, ServerConfig};
use server::state::AppState;

pub mod routes {
    pub const HEALTH: &str = "/health";
    pub const OPENAPI: &str = "/api-docs/openapi.json";
    pub const SIGNUP: &str = "/api/auth/signup";
    pub const SIGNIN: &str = "/api/auth/signin";
    pub const SIGNOUT: &str = "/api/auth/signout";
    pub const BUMBU: &str = "/api/bumbu";
    pub const POTONG: &str = "/api/potong";
    pub const CONTENT: &str = "/api/content";
    pub const USERS: &str = "/api/users";

    pub fn bumbu(id: &str) -> String {
        format!("/api/bumbu/{id}")
    }

    pub fn potong(id: &str) -> String {
        format!("/api/potong/{id}")
    }

    pub fn content(key: &str) -> String {
        format!("/api/content/{key}")
    }

    pub fn user(id: &str) -> String {
        format!("/api/users/{id}")
    }
}

pub const EMAIL: &str = "admin@dagingue.id";
pub const PASSWORD: &str = "rahasia123";

/// A running test server backed by in-memory tables and identities, with
/// images written to a temporary directory and served under `/uploads`.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub backend: Backend,
    uploads: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    /// Row id at `pointer`, rendered as a path segment.
    pub fn id_at(&self, pointer: &str) -> String {
        match self.body.pointer(pointer) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            other => panic!("No id at {pointer}: {other:?} in {}", self.text),
        }
    }
}

/// A multipart part holding a tiny PNG payload.
pub fn png(file_name: &str) -> Part {
    image_part(file_name, b"\x89PNG\r\n\x1a\nfake".to_vec(), "image/png")
}

pub fn image_part(file_name: &str, bytes: Vec<u8>, mime: &str) -> Part {
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .expect("Failed to set MIME type")
}

pub fn bumbu_form(nama: &str, deskripsi: &str, harga: &str) -> Form {
    Form::new()
        .text("nama", nama.to_string())
        .text("deskripsi", deskripsi.to_string())
        .text("harga", harga.to_string())
}

/// The `data` field of a landing-page batch.
pub fn content_form(data: Value) -> Form {
    Form::new().text("data", data.to_string())
}

/// Replacements for parts of the local backend. Parts left as `None` are
/// the usual in-memory and filesystem ones.
#[derive(Default)]
pub struct BackendParts {
    pub tables: Option<Arc<dyn TableStore>>,
    pub storage: Option<Arc<dyn BlobStore>>,
    pub identity: Option<Arc<dyn IdentityProvider>>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(BackendParts::default()).await
    }

    pub async fn spawn_with(parts: BackendParts) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");

        let backend_config = BackendConfig {
            provider: Provider::Memory,
            storage: StorageConfig {
                provider: StorageProvider::Filesystem,
                public_url: Some(format!("http://{addr}/uploads")),
                root: uploads.path().to_path_buf(),
                ..Default::default()
            },
            ..Default::default()
        };

        let storage = match parts.storage {
            Some(storage) => storage,
            None => Arc::new(
                FilesystemBlobStore::new(
                    backend_config.storage.root.clone(),
                    format!("http://{addr}/uploads"),
                    backend_config.storage.max_size,
                )
                .await
                .expect("Failed to set up upload store"),
            ),
        };
        let backend = Backend::new(
            parts.tables.unwrap_or_else(|| {
                Arc::new(MemoryTableStore::new().with_unique("landing_page", "key"))
            }),
            storage,
            parts
                .identity
                .unwrap_or_else(|| Arc::new(MemoryIdentity::new())),
        );

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
                upload_limit: 10 * 1024 * 1024,
            },
            log: LogConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
            backend: backend_config,
        };

        let app = server::build_router(AppState {
            backend: backend.clone(),
            config,
        });

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            backend,
            uploads,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let req = self.client.request(method, self.url(path));
        match token {
            Some(token) => req.header("Authorization", format!("Bearer {token}")),
            None => req,
        }
    }

    async fn send(req: RequestBuilder) -> TestResponse {
        let res = req.send().await.expect("Failed to send request");
        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        Self::send(self.request(Method::GET, path, None)).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        Self::send(self.request(Method::GET, path, Some(token))).await
    }

    pub async fn post_json(&self, path: &str, body: &Value, token: Option<&str>) -> TestResponse {
        Self::send(self.request(Method::POST, path, token).json(body)).await
    }

    pub async fn put_json(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        Self::send(self.request(Method::PUT, path, Some(token)).json(body)).await
    }

    pub async fn post_form(&self, path: &str, form: Form, token: Option<&str>) -> TestResponse {
        Self::send(self.request(Method::POST, path, token).multipart(form)).await
    }

    pub async fn put_form(&self, path: &str, form: Form, token: &str) -> TestResponse {
        Self::send(self.request(Method::PUT, path, Some(token)).multipart(form)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> TestResponse {
        Self::send(self.request(Method::DELETE, path, token)).await
    }

    /// Register the admin account, sign in and return the bearer token.
    pub async fn admin_token(&self) -> String {
        let creds = serde_json::json!({ "email": EMAIL, "password": PASSWORD });

        let res = self.post_json(routes::SIGNUP, &creds, None).await;
        assert_eq!(res.status, 201, "Sign-up failed: {}", res.text);

        let res = self.post_json(routes::SIGNIN, &creds, None).await;
        assert_eq!(res.status, 200, "Sign-in failed: {}", res.text);

        res.body["result"]["token"]
            .as_str()
            .expect("Sign-in response should contain a token")
            .to_string()
    }

    /// Create a bumbu with a PNG image and return the response.
    pub async fn create_bumbu(&self, token: &str, nama: &str) -> TestResponse {
        let form = bumbu_form(nama, "Bumbu khas", "25000").part("gambar", png("bumbu.png"));
        let res = self.post_form(routes::BUMBU, form, Some(token)).await;
        assert_eq!(res.status, 201, "create_bumbu failed: {}", res.text);
        res
    }

    /// Create a potong with a PNG image and return the response.
    pub async fn create_potong(&self, token: &str, nama: &str, berat: &str) -> TestResponse {
        let form = Form::new()
            .text("nama", nama.to_string())
            .text("berat", berat.to_string())
            .part("gambar", png("potong.png"));
        let res = self.post_form(routes::POTONG, form, Some(token)).await;
        assert_eq!(res.status, 201, "create_potong failed: {}", res.text);
        res
    }

    /// Directory of an image folder inside the temporary store.
    pub fn folder(&self, folder: &str) -> PathBuf {
        self.uploads.path().join(folder)
    }

    /// Number of stored objects in an image folder.
    pub fn stored_objects(&self, folder: &str) -> usize {
        std::fs::read_dir(self.folder(folder))
            .map(|entries| entries.filter_map(Result::ok).count())
            .unwrap_or(0)
    }

    /// Whether the object behind a public URL exists in the store.
    pub async fn object_exists(&self, url: &str) -> bool {
        let storage = self.backend.storage();
        match storage.path_from_public_url(url) {
            Some(path) => storage.exists(&path).await.unwrap(),
            None => false,
        }
    }
}
