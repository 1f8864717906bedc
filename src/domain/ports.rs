use crate::domain::model::ResourceKind;
use crate::domain::node::Node;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// The page region the renderer owns. Every call replaces the whole content.
pub trait Container: Send + Sync {
    fn replace_content(&self, nodes: &[Node])
        -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn posts_endpoint(&self) -> &str;
    fn comments_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn page_title(&self) -> &str;
    fn startup_delay(&self) -> Duration;
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fetch the whole collection behind `kind`. Any transport, status or
    /// decode failure is returned as-is; there is no partial result.
    async fn fetch<T>(&self, kind: ResourceKind) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static;
}

/// Fire-and-forget registration of a background asset cache worker.
#[async_trait]
pub trait BackgroundRegistration: Send + Sync {
    /// Returns the scope the worker was registered for.
    async fn register(&self, script_url: &str) -> Result<String>;
}
