//! The data-source trait.
//!
//! A [`DataSource`] is the remote (or local) store the feed is loaded from
//! and written through. The feed engine never talks to it directly; a
//! [`FeedSession`](crate::FeedSession) drives the engine from its results.
//!
//! # Hints
//!
//! [`DataSource::fetch_all`] accepts optional category and search hints.
//! They are advisory: a source may narrow its result with them, but the
//! engine's own filters remain authoritative. The category sentinel `"all"`
//! means "no category hint".

use async_trait::async_trait;
use blogfeed_core::Result;
use blogfeed_engine::{ContentItem, ALL_CATEGORIES};

use crate::fields::ItemFields;

/// A store of posts.
///
/// # Example
///
/// ```rust,ignore
/// use blogfeed_source::{DataSource, MemorySource};
///
/// let source = MemorySource::new();
/// let posts = source.fetch_all(Some("Food"), None).await?;
/// ```
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch every post, optionally narrowed by hints.
    ///
    /// Returned order is the display order (most recent first).
    async fn fetch_all(
        &self,
        category_hint: Option<&str>,
        search_hint: Option<&str>,
    ) -> Result<Vec<ContentItem>>;

    /// Fetch one post by identifier.
    ///
    /// Returns `Error::NotFound` if it does not exist.
    async fn get(&self, id: &str) -> Result<ContentItem>;

    /// Create a post, assigning its identifier and timestamps.
    async fn create(&self, fields: ItemFields) -> Result<ContentItem>;

    /// Overwrite a post's editable fields, stamping its update time.
    async fn update(&self, id: &str, fields: ItemFields) -> Result<ContentItem>;

    /// Delete a post.
    async fn remove(&self, id: &str) -> Result<()>;

    /// Category labels offered when creating or editing a post.
    async fn list_categories(&self) -> Result<Vec<String>>;

    /// Short name for log lines.
    fn name(&self) -> &str {
        "source"
    }
}

/// Normalize a category hint: blank and `"all"` become `None`.
pub fn category_hint(hint: Option<&str>) -> Option<&str> {
    hint.map(str::trim)
        .filter(|h| !h.is_empty() && *h != ALL_CATEGORIES)
}

/// Normalize a search hint: empty becomes `None`.
pub fn search_hint(hint: Option<&str>) -> Option<&str> {
    hint.filter(|h| !h.is_empty())
}
