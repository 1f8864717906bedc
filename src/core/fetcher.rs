use crate::core::{CollectionSource, ConfigProvider, ResourceKind};
use crate::utils::error::{FeedError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Fetches collections over HTTP GET, one fixed endpoint per resource kind.
pub struct HttpCollectionSource {
    client: Client,
    posts_endpoint: String,
    comments_endpoint: String,
}

impl HttpCollectionSource {
    pub fn new(posts_endpoint: String, comments_endpoint: String) -> Self {
        Self {
            client: Client::new(),
            posts_endpoint,
            comments_endpoint,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            posts_endpoint: config.posts_endpoint().to_string(),
            comments_endpoint: config.comments_endpoint().to_string(),
        })
    }

    pub fn endpoint(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Posts => &self.posts_endpoint,
            ResourceKind::Comments => &self.comments_endpoint,
        }
    }
}

#[async_trait::async_trait]
impl CollectionSource for HttpCollectionSource {
    async fn fetch<T>(&self, kind: ResourceKind) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let endpoint = self.endpoint(kind);
        tracing::debug!("Making API request for {} to: {}", kind, endpoint);

        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        tracing::debug!("API response status for {}: {}", kind, status);

        if !status.is_success() {
            return Err(FeedError::HttpStatusError {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let records: Vec<T> = serde_json::from_slice(&body)?;
        tracing::debug!("Decoded {} {} records", records.len(), kind);

        Ok(records)
    }
}
