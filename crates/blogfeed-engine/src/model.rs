//! Content items and their tag lists.
//!
//! A [`ContentItem`] is immutable once built: every "edit" produces a new
//! item that replaces the old one wholesale. Deserialization accepts both
//! the plain `snake_case` shape and the hosted document store's shape
//! (`$id`, `$createdAt`, `$updatedAt`, `content`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Tags
// ============================================================================

/// Ordered tag list without duplicates.
///
/// Tags are trimmed; empty and repeated tags are dropped on insertion, so
/// the no-duplicates invariant holds no matter how the list was built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Tags(Vec<String>);

impl Tags {
    /// Create an empty tag list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag. Returns `false` if it was empty or already present.
    pub fn push(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Remove a tag. Returns `false` if it was not present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    /// Whether the list contains `tag` (exact match).
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Iterate tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The tags as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Tags {
    fn from(raw: Vec<String>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<Tags> for Vec<String> {
    fn from(tags: Tags) -> Self {
        tags.0
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for tag in iter {
            tags.push(tag);
        }
        tags
    }
}

// ============================================================================
// ContentItem
// ============================================================================

/// One feed entry (a blog post).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ItemRecord")]
pub struct ContentItem {
    id: String,
    title: String,
    description: String,
    body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<String>,
    category: String,
    author: String,
    tags: Tags,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// Create an item with the given identifier, title, and creation time.
    ///
    /// All other text fields start empty; use the `with_*` methods to fill
    /// them in.
    ///
    /// # Example
    ///
    /// ```
    /// use blogfeed_engine::ContentItem;
    /// use chrono::Utc;
    ///
    /// let item = ContentItem::new("1", "Pasta Night", Utc::now())
    ///     .with_category("Food")
    ///     .with_author("Ada")
    ///     .with_tags(["dinner", "italian", "dinner"]);
    ///
    /// assert_eq!(item.tags().len(), 2);
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            body: String::new(),
            thumbnail: None,
            category: String::new(),
            author: String::new(),
            tags: Tags::new(),
            created_at,
            updated_at: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the thumbnail URL.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Add a single tag (ignored if already present).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag);
        self
    }

    /// Replace the tag list.
    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Set the last-update time. A time equal to `created_at` is dropped.
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = (updated_at != self.created_at).then_some(updated_at);
        self
    }

    /// Unique, opaque identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Post title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short description shown on cards.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Full body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Thumbnail URL, if any.
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    /// Category label.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Tags in insertion order.
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last-update time, present only if it differs from `created_at`.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Wire shape accepted when deserializing a [`ContentItem`].
#[derive(Deserialize)]
struct ItemRecord {
    #[serde(alias = "$id")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "content")]
    body: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    tags: Option<Tags>,
    #[serde(alias = "$createdAt")]
    created_at: DateTime<Utc>,
    #[serde(default, alias = "$updatedAt")]
    updated_at: Option<DateTime<Utc>>,
}

impl From<ItemRecord> for ContentItem {
    fn from(record: ItemRecord) -> Self {
        let item = ContentItem {
            id: record.id,
            title: record.title.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            body: record.body.unwrap_or_default(),
            thumbnail: record.thumbnail.filter(|t| !t.is_empty()),
            category: record.category.unwrap_or_default(),
            author: record.author.unwrap_or_default(),
            tags: record.tags.unwrap_or_default(),
            created_at: record.created_at,
            updated_at: None,
        };
        match record.updated_at {
            Some(updated) => item.with_updated_at(updated),
            None => item,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
