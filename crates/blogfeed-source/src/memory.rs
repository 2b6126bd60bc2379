//! In-memory data source, optionally seeded from a JSON snapshot.
//!
//! Accepted snapshot shapes:
//!
//! ```json
//! { "documents": [ ... ], "categories": ["Food", "Travel"] }
//! ```
//!
//! or a bare array of posts. Posts may use either the plain field names or
//! the hosted document store's (`$id`, `$createdAt`, `content`, ...), so a
//! `listDocuments` export loads as-is.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use blogfeed_core::{Error, Result};
use blogfeed_engine::ContentItem;
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::fields::ItemFields;
use crate::provider::{category_hint, search_hint, DataSource};

/// Categories offered when a snapshot does not list its own.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Entertainment",
    "Food",
    "Science",
    "Sports",
    "Travel",
    "Technology",
];

/// A [`DataSource`] held entirely in memory.
///
/// Clones share the same documents. Documents are kept most recent first.
#[derive(Clone)]
pub struct MemorySource {
    documents: Arc<Mutex<Vec<ContentItem>>>,
    categories: Arc<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Wrapped {
        documents: Vec<ContentItem>,
        #[serde(default)]
        categories: Vec<String>,
    },
    Bare(Vec<ContentItem>),
}

impl MemorySource {
    /// Create an empty source with the default categories.
    pub fn new() -> Self {
        Self::build(Vec::new(), Vec::new())
    }

    /// Create a source holding `documents`, in the given order.
    ///
    /// Returns `Error::Validation` if two documents share an identifier.
    pub fn from_documents(documents: Vec<ContentItem>) -> Result<Self> {
        check_unique(&documents)?;
        Ok(Self::build(documents, Vec::new()))
    }

    /// Parse a JSON snapshot.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let (documents, categories) = match serde_json::from_str::<Snapshot>(json)? {
            Snapshot::Wrapped {
                documents,
                categories,
            } => (documents, categories),
            Snapshot::Bare(documents) => (documents, Vec::new()),
        };
        check_unique(&documents)?;
        Ok(Self::build(documents, categories))
    }

    /// Read and parse a JSON snapshot file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_path(e, path))?;
        let source = Self::from_json_str(&json)?;
        log::debug!("Loaded snapshot from {}", path.display());
        Ok(source)
    }

    /// Replace the offered category list. An empty list restores the defaults.
    pub fn with_categories<S: Into<String>>(
        mut self,
        categories: impl IntoIterator<Item = S>,
    ) -> Self {
        let categories = categories.into_iter().map(Into::into).collect();
        self.categories = Arc::new(or_defaults(categories));
        self
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.lock().await.is_empty()
    }

    fn build(documents: Vec<ContentItem>, categories: Vec<String>) -> Self {
        Self {
            documents: Arc::new(Mutex::new(documents)),
            categories: Arc::new(or_defaults(categories)),
        }
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

fn or_defaults(categories: Vec<String>) -> Vec<String> {
    if categories.is_empty() {
        DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
    } else {
        categories
    }
}

fn check_unique(documents: &[ContentItem]) -> Result<()> {
    let mut seen = HashSet::new();
    for doc in documents {
        if !seen.insert(doc.id()) {
            return Err(Error::validation(format!(
                "duplicate post id '{}' in snapshot",
                doc.id()
            )));
        }
    }
    Ok(())
}

fn prepare(fields: ItemFields) -> Result<ItemFields> {
    let fields = fields.normalized();
    fields.validate()?;
    Ok(fields)
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch_all(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<ContentItem>> {
        let category = category_hint(category);
        let needle = search_hint(search).map(str::to_lowercase);
        let documents = self.documents.lock().await;

        Ok(documents
            .iter()
            .filter(|doc| category.is_none_or(|c| doc.category() == c))
            .filter(|doc| {
                needle
                    .as_deref()
                    .is_none_or(|n| doc.title().to_lowercase().contains(n))
            })
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<ContentItem> {
        let documents = self.documents.lock().await;
        documents
            .iter()
            .find(|doc| doc.id() == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("post '{id}'")))
    }

    async fn create(&self, fields: ItemFields) -> Result<ContentItem> {
        let fields = prepare(fields)?;
        let id = Uuid::new_v4().simple().to_string();
        let item = fields.into_item(id, Utc::now(), None);

        let mut documents = self.documents.lock().await;
        documents.insert(0, item.clone());
        log::debug!("Created post {}", item.id());
        Ok(item)
    }

    async fn update(&self, id: &str, fields: ItemFields) -> Result<ContentItem> {
        let fields = prepare(fields)?;
        let mut documents = self.documents.lock().await;
        let slot = documents
            .iter_mut()
            .find(|doc| doc.id() == id)
            .ok_or_else(|| Error::not_found(format!("post '{id}'")))?;

        let item = fields.into_item(id, slot.created_at(), Some(Utc::now()));
        *slot = item.clone();
        log::debug!("Updated post {id}");
        Ok(item)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let mut documents = self.documents.lock().await;
        let index = documents
            .iter()
            .position(|doc| doc.id() == id)
            .ok_or_else(|| Error::not_found(format!("post '{id}'")))?;
        documents.remove(index);
        log::debug!("Removed post {id}");
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<String>> {
        Ok(self.categories.as_ref().clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
