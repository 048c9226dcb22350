mod gotrue;
mod memory;

pub use gotrue::GoTrueClient;
pub use memory::MemoryIdentity;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// An authenticated principal as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Result of a password sign-in.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub identity: Identity,
}

/// Sign-up, sign-in, sign-out and token introspection.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    /// Revoke the session that `access_token` belongs to.
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;

    /// Resolve an access token. `Ok(None)` means the token is unknown,
    /// malformed or expired; `Err` means the service could not be asked.
    async fn get_user(&self, access_token: &str) -> Result<Option<Identity>, BackendError>;
}
