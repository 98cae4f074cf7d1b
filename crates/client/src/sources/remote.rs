use std::time::Duration;

use async_trait::async_trait;
use models::Category;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::ContentSource;
use crate::{errors::SourceError, loader::Tier};

/// Portal data API on another host: `GET`/`PUT {base}/api/data/{slug}`.
pub struct RemoteSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url, token: None })
    }

    /// Admin session token sent as `Authorization: Bearer` on writes.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, category: Category) -> String {
        format!("{}/api/data/{}", self.base_url, category.slug())
    }
}

#[async_trait]
impl ContentSource for RemoteSource {
    fn tier(&self) -> Tier {
        Tier::Remote
    }

    async fn load(&self, category: Category) -> Result<Option<Value>, SourceError> {
        let url = self.url(category);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(%url, "remote has no data");
                Ok(None)
            }
            s if s.is_success() => Ok(Some(response.json::<Value>().await?)),
            s => Err(SourceError::Status { status: s.as_u16(), url }),
        }
    }

    async fn store(&self, category: Category, data: &Value) -> Result<(), SourceError> {
        let url = self.url(category);
        let mut request = self.client.put(&url).json(data);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status { status: response.status().as_u16(), url });
        }
        Ok(())
    }
}
