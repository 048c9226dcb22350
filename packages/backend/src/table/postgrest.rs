use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use tracing::instrument;

use super::{Filter, Row, TableStore, value_text};
use crate::error::{BackendError, from_error_body};

/// Table access through the managed backend's PostgREST gateway
/// (`{url}/rest/v1/{table}`).
pub struct PostgrestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(http: reqwest::Client, project_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }

    fn request(&self, method: Method, table: &str, filter: Option<&Filter>) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation");
        if let Some(filter) = filter {
            builder = builder.query(&[(
                filter.column.as_str(),
                format!("eq.{}", value_text(&filter.value)),
            )]);
        }
        builder
    }

    async fn send(builder: RequestBuilder) -> Result<Vec<Row>, BackendError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(from_error_body(status.as_u16(), &body));
        }
        if body.is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl TableStore for PostgrestClient {
    #[instrument(skip(self, filter))]
    async fn select(&self, table: &str, filter: Option<&Filter>) -> Result<Vec<Row>, BackendError> {
        let builder = self
            .request(Method::GET, table, filter)
            .query(&[("select", "*")]);
        Self::send(builder).await
    }

    #[instrument(skip(self, row))]
    async fn insert(&self, table: &str, row: Row) -> Result<Row, BackendError> {
        let builder = self.request(Method::POST, table, None).json(&[row]);
        Self::send(builder)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::api(500, format!("Insert into '{table}' returned no row")))
    }

    #[instrument(skip(self, filter, changes))]
    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        changes: Row,
    ) -> Result<Vec<Row>, BackendError> {
        let builder = self
            .request(Method::PATCH, table, Some(filter))
            .json(&changes);
        Self::send(builder).await
    }

    #[instrument(skip(self, filter))]
    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, BackendError> {
        let builder = self.request(Method::DELETE, table, Some(filter));
        Ok(Self::send(builder).await?.len())
    }

    async fn probe(&self, table: &str) -> Result<(), BackendError> {
        let builder = self
            .request(Method::GET, table, None)
            .query(&[("select", "*"), ("limit", "1")]);
        Self::send(builder).await.map(|_| ())
    }
}
