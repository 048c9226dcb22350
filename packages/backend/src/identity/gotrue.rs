use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::{Identity, IdentityProvider, Session};
use crate::error::{BackendError, from_error_body};

/// Identity calls against the managed backend's GoTrue service
/// (`{url}/auth/v1`).
pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: Identity,
}

/// Sign-up answers with a bare user, or with a session wrapping it when
/// e-mail confirmation is disabled.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session { user: Identity },
    User(Identity),
}

impl GoTrueClient {
    pub fn new(http: reqwest::Client, project_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: format!("{}/auth/v1", project_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(from_error_body(status.as_u16(), &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        let response = self
            .http
            .post(self.url("signup"))
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        Ok(match Self::read_json::<SignUpResponse>(response).await? {
            SignUpResponse::Session { user } | SignUpResponse::User(user) => user,
        })
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let response = self
            .http
            .post(self.url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let token: TokenResponse = Self::read_json(response).await?;
        Ok(Session {
            access_token: token.access_token,
            identity: token.user,
        })
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.url("logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await?;
        Err(from_error_body(status.as_u16(), &body))
    }

    #[instrument(skip_all)]
    async fn get_user(&self, access_token: &str) -> Result<Option<Identity>, BackendError> {
        let response = self
            .http
            .get(self.url("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            _ => Self::read_json(response).await.map(Some),
        }
    }
}
