//! A feed engine bound to the data source it is loaded from.
//!
//! [`FeedSession`] owns the load cycle: fetch everything, hand it to the
//! engine, and mirror successful writes into the engine so the view stays
//! in step with the source without a reload.

use std::sync::Arc;

use blogfeed_core::{Error, Result};
use blogfeed_engine::{ContentItem, FeedEngine};

use crate::fields::ItemFields;
use crate::provider::DataSource;

/// A [`FeedEngine`] plus its [`DataSource`].
pub struct FeedSession {
    engine: FeedEngine,
    source: Arc<dyn DataSource>,
}

impl FeedSession {
    /// Create a session with an empty engine.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self::with_engine(source, FeedEngine::new())
    }

    /// Create a session around a pre-configured engine.
    pub fn with_engine(source: Arc<dyn DataSource>, engine: FeedEngine) -> Self {
        Self { engine, source }
    }

    /// The engine, for reading the view and setting filters.
    pub fn engine(&self) -> &FeedEngine {
        &self.engine
    }

    /// Mutable access to the engine's filters.
    pub fn engine_mut(&mut self) -> &mut FeedEngine {
        &mut self.engine
    }

    /// The underlying source.
    pub fn source(&self) -> &Arc<dyn DataSource> {
        &self.source
    }

    /// Fetch every post and replace the engine's collection.
    ///
    /// A failed fetch is logged and loads an empty feed. Returns the number
    /// of posts loaded.
    pub async fn load(&mut self) -> Result<usize> {
        self.load_with_hints(None, None).await
    }

    /// Like [`load`](Self::load), passing advisory hints to the source.
    ///
    /// Hints only narrow what is fetched. The engine's filters are left
    /// untouched and still apply to the view.
    pub async fn load_with_hints(
        &mut self,
        category_hint: Option<&str>,
        search_hint: Option<&str>,
    ) -> Result<usize> {
        let items = match self.source.fetch_all(category_hint, search_hint).await {
            Ok(items) => items,
            Err(err) => {
                log::warn!("Failed to fetch posts from {}: {err}", self.source.name());
                Vec::new()
            }
        };
        let count = items.len();
        self.engine.replace_all(items)?;
        log::info!("Loaded {count} post(s) from {}", self.source.name());
        Ok(count)
    }

    /// Create a post at the source and show it first.
    pub async fn create(&mut self, fields: ItemFields) -> Result<ContentItem> {
        let created = self.source.create(fields).await?;
        self.engine.insert(created.clone())?;
        Ok(created)
    }

    /// Update a post at the source and replace it in place.
    ///
    /// Returns `Error::NotFound` without contacting the source if the post
    /// is not in the feed.
    pub async fn update(&mut self, id: &str, fields: ItemFields) -> Result<ContentItem> {
        self.require(id)?;
        let updated = self.source.update(id, fields).await?;
        self.engine.replace_one(id, updated.clone())?;
        Ok(updated)
    }

    /// Delete a post at the source and drop it from the feed.
    pub async fn delete(&mut self, id: &str) -> Result<ContentItem> {
        self.require(id)?;
        self.source.remove(id).await?;
        self.engine.remove(id)
    }

    /// One post, from the feed if loaded, otherwise from the source.
    pub async fn detail(&self, id: &str) -> Result<ContentItem> {
        match self.engine.get(id) {
            Some(item) => Ok(item.clone()),
            None => self.source.get(id).await,
        }
    }

    /// Categories offered for new posts. A failed fetch yields none.
    pub async fn categories(&self) -> Vec<String> {
        match self.source.list_categories().await {
            Ok(categories) => categories,
            Err(err) => {
                log::warn!("Failed to fetch categories: {err}");
                Vec::new()
            }
        }
    }

    /// Drop the loaded posts and reset filters.
    pub fn teardown(&mut self) {
        self.engine.clear();
        self.engine.reset_filters();
    }

    fn require(&self, id: &str) -> Result<()> {
        if self.engine.contains(id) {
            Ok(())
        } else {
            Err(Error::not_found(format!("post '{id}' is not in the feed")))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;
    use async_trait::async_trait;

    const SNAPSHOT: &str = r#"[
        {"id": "a", "title": "Street Food in Hanoi", "body": "Pho", "category": "Food",
         "author": "Linh", "created_at": "2024-03-01T10:00:00Z"},
        {"id": "b", "title": "Black Holes", "body": "Event horizons", "category": "Science",
         "author": "Ade", "created_at": "2024-02-01T10:00:00Z"},
        {"id": "c", "title": "Baking Bread", "body": "Sourdough", "category": "Food",
         "author": "Ade", "created_at": "2024-01-01T10:00:00Z"}
    ]"#;

    /// Every call fails.
    struct DownSource;

    #[async_trait]
    impl DataSource for DownSource {
        async fn fetch_all(&self, _: Option<&str>, _: Option<&str>) -> Result<Vec<ContentItem>> {
            Err(Error::data_source("unreachable"))
        }

        async fn get(&self, _: &str) -> Result<ContentItem> {
            Err(Error::data_source("unreachable"))
        }

        async fn create(&self, _: ItemFields) -> Result<ContentItem> {
            Err(Error::data_source("unreachable"))
        }

        async fn update(&self, _: &str, _: ItemFields) -> Result<ContentItem> {
            Err(Error::data_source("unreachable"))
        }

        async fn remove(&self, _: &str) -> Result<()> {
            Err(Error::data_source("unreachable"))
        }

        async fn list_categories(&self) -> Result<Vec<String>> {
            Err(Error::data_source("unreachable"))
        }
    }

    fn fields(title: &str, category: &str) -> ItemFields {
        ItemFields {
            title: title.into(),
            description: "d".into(),
            body: "b".into(),
            category: category.into(),
            author: "Mo".into(),
            ..Default::default()
        }
    }

    async fn loaded() -> (FeedSession, MemorySource) {
        let memory = MemorySource::from_json_str(SNAPSHOT).unwrap();
        let mut session = FeedSession::new(Arc::new(memory.clone()));
        assert_eq!(session.load().await.unwrap(), 3);
        (session, memory)
    }

    fn view_ids(session: &FeedSession) -> Vec<String> {
        session
            .engine()
            .view()
            .iter()
            .map(|i| i.id().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_load_then_filter() {
        let (mut session, _) = loaded().await;
        session.engine_mut().set_category_filter("Food");
        assert_eq!(view_ids(&session), vec!["a", "c"]);

        session.engine_mut().set_search_query("BREAD");
        assert_eq!(view_ids(&session), vec!["c"]);
    }

    #[tokio::test]
    async fn test_load_failure_yields_empty_feed() {
        let mut session = FeedSession::new(Arc::new(DownSource));
        assert_eq!(session.load().await.unwrap(), 0);
        assert!(session.engine().view().is_empty());
        assert!(session.categories().await.is_empty());
    }

    #[tokio::test]
    async fn test_reload_replaces_collection() {
        let (mut session, memory) = loaded().await;
        memory.remove("b").await.unwrap();
        assert_eq!(session.load().await.unwrap(), 2);
        assert!(!session.engine().contains("b"));
    }

    #[tokio::test]
    async fn test_load_with_hints_keeps_engine_filters() {
        let (mut session, _) = loaded().await;
        session.engine_mut().set_search_query("black");
        assert_eq!(session.load_with_hints(Some("Food"), None).await.unwrap(), 2);
        assert!(session.engine().view().is_empty());
        assert_eq!(session.engine().search_query(), "black");
    }

    #[tokio::test]
    async fn test_create_shows_first() {
        let (mut session, memory) = loaded().await;
        let created = session.create(fields("Ramen", "Food")).await.unwrap();

        assert_eq!(session.engine().view()[0].id(), created.id());
        assert_eq!(memory.len().await, 4);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_feed_untouched() {
        let (mut session, _) = loaded().await;
        let err = session.create(fields("", "Food")).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.engine().len(), 3);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let (mut session, _) = loaded().await;
        let updated = session
            .update("b", fields("Black Holes, Revisited", "Science"))
            .await
            .unwrap();

        assert_eq!(view_ids(&session), vec!["a", "b", "c"]);
        assert_eq!(session.engine().get("b").unwrap(), &updated);
        assert!(updated.updated_at().is_some());
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let (mut session, _) = loaded().await;
        let err = session.update("zzz", fields("t", "Food")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let (mut session, memory) = loaded().await;
        let removed = session.delete("a").await.unwrap();
        assert_eq!(removed.id(), "a");
        assert_eq!(view_ids(&session), vec!["b", "c"]);
        assert_eq!(memory.len().await, 2);

        assert!(session.delete("a").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_post() {
        let mut engine = FeedEngine::new();
        engine
            .insert(ContentItem::new("x", "t", chrono::Utc::now()))
            .unwrap();
        let mut session = FeedSession::with_engine(Arc::new(DownSource), engine);

        let err = session.delete("x").await.unwrap_err();
        assert!(err.is_retryable());
        assert!(session.engine().contains("x"));
    }

    #[tokio::test]
    async fn test_detail_falls_back_to_source() {
        let (mut session, memory) = loaded().await;
        let extra = memory.create(fields("Fresh", "Travel")).await.unwrap();

        assert_eq!(session.detail("a").await.unwrap().title(), "Street Food in Hanoi");
        assert_eq!(session.detail(extra.id()).await.unwrap(), extra);
        assert!(session.detail("zzz").await.unwrap_err().is_not_found());

        session.teardown();
        assert!(session.engine().is_empty());
    }

    #[tokio::test]
    async fn test_categories() {
        let (session, _) = loaded().await;
        assert_eq!(session.categories().await.len(), 6);
    }
}
