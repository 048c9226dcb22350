use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use dashmap::DashMap;

use super::{Identity, IdentityProvider, Session};
use crate::error::BackendError;

struct Account {
    identity: Identity,
    password_hash: String,
}

/// In-process identity service: accounts keyed by lower-cased e-mail,
/// opaque random access tokens.
#[derive(Default)]
pub struct MemoryIdentity {
    accounts: DashMap<String, Account>,
    sessions: DashMap<String, Identity>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }
}

fn hash_password(password: &str) -> Result<String, BackendError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BackendError::api(500, format!("Password hash error: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        let key = email.trim().to_lowercase();
        if self.accounts.contains_key(&key) {
            return Err(BackendError::api(422, "User already registered"));
        }

        let identity = Identity {
            id: uuid::Uuid::new_v4().to_string(),
            email: Some(key.clone()),
        };
        let account = Account {
            identity: identity.clone(),
            password_hash: hash_password(password)?,
        };
        self.accounts.insert(key, account);
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let key = email.trim().to_lowercase();
        let identity = self
            .accounts
            .get(&key)
            .filter(|account| verify_password(password, &account.password_hash))
            .map(|account| account.identity.clone())
            .ok_or_else(|| BackendError::api(400, "Invalid login credentials"))?;

        let access_token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.insert(access_token.clone(), identity.clone());
        Ok(Session {
            access_token,
            identity,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        self.sessions.remove(access_token);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<Identity>, BackendError> {
        Ok(self
            .sessions
            .get(access_token)
            .map(|identity| identity.clone()))
    }
}
