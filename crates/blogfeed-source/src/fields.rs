//! Create/update payloads and their form validation.

use std::collections::BTreeMap;
use std::fmt;

use blogfeed_core::Error;
use blogfeed_engine::{ContentItem, Tags};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The editable fields of a post, as submitted by a form.
///
/// Identifier and timestamps are assigned by the data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFields {
    /// Post title.
    pub title: String,
    /// Card description.
    pub description: String,
    /// Full body text.
    #[serde(alias = "content")]
    pub body: String,
    /// Thumbnail URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Category label.
    pub category: String,
    /// Author name.
    pub author: String,
    /// Tags; duplicates are dropped.
    pub tags: Tags,
}

impl ItemFields {
    /// Prefill from an existing item, for editing.
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            title: item.title().to_string(),
            description: item.description().to_string(),
            body: item.body().to_string(),
            thumbnail: item.thumbnail().map(str::to_string),
            category: item.category().to_string(),
            author: item.author().to_string(),
            tags: item.tags().clone(),
        }
    }

    /// Trim every text field; a blank thumbnail becomes `None`.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            body: self.body.trim().to_string(),
            thumbnail: self
                .thumbnail
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            category: self.category.trim().to_string(),
            author: self.author.trim().to_string(),
            tags: self.tags,
        }
    }

    /// Check required fields. Reports every missing field at once.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        let required = [
            ("title", &self.title, "Title is required"),
            ("description", &self.description, "Description is required"),
            ("body", &self.body, "Content is required"),
            ("category", &self.category, "Category is required"),
            ("author", &self.author, "Author is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field, message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the stored item.
    pub fn into_item(
        self,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> ContentItem {
        let mut item = ContentItem::new(id, self.title, created_at)
            .with_description(self.description)
            .with_body(self.body)
            .with_category(self.category)
            .with_author(self.author)
            .with_tags(self.tags.iter());
        if let Some(thumbnail) = self.thumbnail {
            item = item.with_thumbnail(thumbnail);
        }
        if let Some(updated_at) = updated_at {
            item = item.with_updated_at(updated_at);
        }
        item
    }
}

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Record a message for `field`.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join("; "))
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::validation(errors.to_string())
    }
}
