use crate::core::join::join;
use crate::core::render::render;
use crate::core::{
    BackgroundRegistration, CollectionSource, Comment, Container, OutcomeKind, Post,
    PostWithComments, RenderOutcome, ResourceKind,
};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_STARTUP_DELAY: Duration =
    Duration::from_millis(crate::config::DEFAULT_DELAY_MS);

/// Runs the single fetch-join-render pass against one container.
pub struct FeedEngine<S: CollectionSource, T: Container> {
    source: S,
    container: T,
    startup_delay: Duration,
    registration: Option<(Arc<dyn BackgroundRegistration>, String)>,
}

impl<S: CollectionSource, T: Container> FeedEngine<S, T> {
    pub fn new(source: S, container: T) -> Self {
        Self {
            source,
            container,
            startup_delay: DEFAULT_STARTUP_DELAY,
            registration: None,
        }
    }

    /// Fixed pause before the fetches start. Unconditional and not cancellable.
    pub fn with_startup_delay(mut self, delay: Duration) -> Self {
        self.startup_delay = delay;
        self
    }

    pub fn with_background_registration(
        mut self,
        registration: Arc<dyn BackgroundRegistration>,
        script_url: impl Into<String>,
    ) -> Self {
        self.registration = Some((registration, script_url.into()));
        self
    }

    pub fn container(&self) -> &T {
        &self.container
    }

    /// Render loading, fetch and join, then render the final state.
    ///
    /// Fetch failures end up as the failed state in the container and are
    /// never returned; only container write errors are.
    pub async fn run(&self) -> Result<OutcomeKind> {
        tracing::info!("🚀 Starting post feed");
        self.spawn_background_registration();

        render(&self.container, &RenderOutcome::Loading).await?;

        let outcome = self.load().await;
        render(&self.container, &outcome).await?;

        let kind = outcome.kind();
        tracing::info!("✅ Rendered {:?} state", kind);
        Ok(kind)
    }

    /// Everything up to (not including) the final render.
    pub async fn load(&self) -> RenderOutcome {
        match self.fetch_and_join().await {
            Ok(posts) if posts.is_empty() => RenderOutcome::Empty,
            Ok(posts) => RenderOutcome::Populated(posts),
            Err(e) => {
                tracing::error!(
                    "❌ Loading posts failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                RenderOutcome::Failed
            }
        }
    }

    async fn fetch_and_join(&self) -> Result<Vec<PostWithComments>> {
        if !self.startup_delay.is_zero() {
            tracing::info!("⏳ Delaying start by {:?}", self.startup_delay);
            tokio::time::sleep(self.startup_delay).await;
        }

        // 任一邊失敗就整體失敗，另一邊的結果直接丟棄
        let (posts, comments) = tokio::try_join!(
            self.source.fetch::<Post>(ResourceKind::Posts),
            self.source.fetch::<Comment>(ResourceKind::Comments),
        )?;
        tracing::info!(
            "📥 Fetched {} posts and {} comments",
            posts.len(),
            comments.len()
        );

        Ok(join(posts, comments))
    }

    fn spawn_background_registration(&self) {
        let Some((registration, script_url)) = &self.registration else {
            return;
        };

        let registration = Arc::clone(registration);
        let script_url = script_url.clone();
        tokio::spawn(async move {
            match registration.register(&script_url).await {
                Ok(scope) => tracing::info!(
                    "Background registration successful with scope: {}",
                    scope
                ),
                Err(e) => tracing::warn!("Background registration failed: {}", e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::MemoryContainer;
    use crate::core::render::{EMPTY_TEXT, FAILED_TEXT};
    use crate::utils::error::FeedError;
    use serde::de::DeserializeOwned;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Instant;
    use tokio::sync::mpsc;

    /// Canned JSON per resource kind; a missing kind answers with a 500.
    struct StaticSource {
        bodies: HashMap<ResourceKind, serde_json::Value>,
        calls: Mutex<Vec<ResourceKind>>,
    }

    impl StaticSource {
        fn new() -> Self {
            Self {
                bodies: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with(mut self, kind: ResourceKind, body: serde_json::Value) -> Self {
            self.bodies.insert(kind, body);
            self
        }
    }

    #[async_trait::async_trait]
    impl CollectionSource for StaticSource {
        async fn fetch<R>(&self, kind: ResourceKind) -> Result<Vec<R>>
        where
            R: DeserializeOwned + Send + 'static,
        {
            self.calls.lock().unwrap().push(kind);
            match self.bodies.get(&kind) {
                Some(body) => Ok(serde_json::from_value(body.clone())?),
                None => Err(FeedError::HttpStatusError {
                    endpoint: kind.to_string(),
                    status: 500,
                }),
            }
        }
    }

    fn engine(source: StaticSource) -> FeedEngine<StaticSource, MemoryContainer> {
        FeedEngine::new(source, MemoryContainer::new()).with_startup_delay(Duration::ZERO)
    }

    fn posts_json() -> serde_json::Value {
        serde_json::json!([
            {"userId": 1, "id": 1, "title": "one", "body": "first post"},
            {"userId": 1, "id": 2, "title": "two", "body": "second post"}
        ])
    }

    fn comments_json() -> serde_json::Value {
        serde_json::json!([
            {"postId": 1, "id": 10, "name": "a", "email": "a@x.io", "body": "c10"},
            {"postId": 2, "id": 11, "name": "b", "email": "b@x.io", "body": "c11"},
            {"postId": 1, "id": 12, "name": "c", "email": "c@x.io", "body": "c12"}
        ])
    }

    #[tokio::test]
    async fn test_load_joins_both_collections() {
        let source = StaticSource::new()
            .with(ResourceKind::Posts, posts_json())
            .with(ResourceKind::Comments, comments_json());

        let outcome = engine(source).load().await;

        let RenderOutcome::Populated(posts) = outcome else {
            panic!("expected populated outcome");
        };
        let ids: Vec<Vec<i64>> = posts
            .iter()
            .map(|p| p.comments.iter().map(|c| c.id).collect())
            .collect();
        assert_eq!(ids, vec![vec![10, 12], vec![11]]);
    }

    #[tokio::test]
    async fn test_run_fetches_both_kinds_once() {
        let source = StaticSource::new()
            .with(ResourceKind::Posts, posts_json())
            .with(ResourceKind::Comments, comments_json());
        let engine = engine(source);

        let kind = engine.run().await.unwrap();

        assert_eq!(kind, OutcomeKind::Populated);
        let mut calls = engine.source.calls.lock().unwrap().clone();
        calls.sort_by_key(|k| k.as_str());
        assert_eq!(calls, vec![ResourceKind::Comments, ResourceKind::Posts]);
        assert!(engine.container().html().await.contains("c12"));
    }

    #[tokio::test]
    async fn test_run_empty_collections_render_empty_state() {
        let source = StaticSource::new()
            .with(ResourceKind::Posts, serde_json::json!([]))
            .with(ResourceKind::Comments, serde_json::json!([]));
        let engine = engine(source);

        assert_eq!(engine.run().await.unwrap(), OutcomeKind::Empty);
        assert!(engine.container().html().await.contains(EMPTY_TEXT));
    }

    #[tokio::test]
    async fn test_run_posts_failure_renders_failed_without_list() {
        let source = StaticSource::new().with(ResourceKind::Comments, comments_json());
        let engine = engine(source);

        assert_eq!(engine.run().await.unwrap(), OutcomeKind::Failed);
        let html = engine.container().html().await;
        assert!(html.contains(FAILED_TEXT));
        assert!(!html.contains("<ul"));
    }

    #[tokio::test]
    async fn test_run_comments_failure_renders_failed() {
        let source = StaticSource::new().with(ResourceKind::Posts, posts_json());

        assert_eq!(engine(source).run().await.unwrap(), OutcomeKind::Failed);
    }

    #[tokio::test]
    async fn test_decode_failure_renders_failed() {
        let source = StaticSource::new()
            .with(ResourceKind::Posts, serde_json::json!([{"id": "not a number"}]))
            .with(ResourceKind::Comments, serde_json::json!([]));

        assert_eq!(engine(source).load().await, RenderOutcome::Failed);
    }

    #[test]
    fn test_default_startup_delay_follows_config_default() {
        let engine = FeedEngine::new(StaticSource::new(), MemoryContainer::new());

        assert_eq!(
            engine.startup_delay,
            Duration::from_millis(crate::config::DEFAULT_DELAY_MS)
        );
    }

    #[tokio::test]
    async fn test_startup_delay_is_waited() {
        let source = StaticSource::new()
            .with(ResourceKind::Posts, serde_json::json!([]))
            .with(ResourceKind::Comments, serde_json::json!([]));
        let engine = FeedEngine::new(source, MemoryContainer::new())
            .with_startup_delay(Duration::from_millis(50));

        let started = Instant::now();
        engine.run().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    struct ChannelRegistration {
        tx: mpsc::UnboundedSender<String>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl BackgroundRegistration for ChannelRegistration {
        async fn register(&self, script_url: &str) -> Result<String> {
            let _ = self.tx.send(script_url.to_string());
            if self.fail {
                return Err(FeedError::ConfigValidationError {
                    field: "service_worker".to_string(),
                    message: "unsupported".to_string(),
                });
            }
            Ok("/".to_string())
        }
    }

    #[tokio::test]
    async fn test_background_registration_is_fired() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let source = StaticSource::new()
            .with(ResourceKind::Posts, posts_json())
            .with(ResourceKind::Comments, comments_json());
        let engine = engine(source).with_background_registration(
            Arc::new(ChannelRegistration { tx, fail: false }),
            "/service-worker.js",
        );

        engine.run().await.unwrap();

        assert_eq!(rx.recv().await.as_deref(), Some("/service-worker.js"));
    }

    #[tokio::test]
    async fn test_background_registration_failure_does_not_affect_render() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let source = StaticSource::new()
            .with(ResourceKind::Posts, posts_json())
            .with(ResourceKind::Comments, comments_json());
        let engine = engine(source).with_background_registration(
            Arc::new(ChannelRegistration { tx, fail: true }),
            "/service-worker.js",
        );

        assert_eq!(engine.run().await.unwrap(), OutcomeKind::Populated);
        assert!(rx.recv().await.is_some());
    }
}
