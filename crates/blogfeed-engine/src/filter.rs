//! The filter pipeline: a category predicate followed by a text predicate.
//!
//! # Match rule
//!
//! An item passes the text predicate when the lowercased query is a
//! substring of at least one of the configured fields, also lowercased.
//! Which fields are consulted is a [`SearchFields`] value:
//!
//! - [`SearchFields::listing`] (default): title, description, body
//! - [`SearchFields::admin`]: title, description, author
//!
//! The two presets correspond to the public listing and the admin
//! dashboard, which historically searched different fields.

use std::fmt;
use std::str::FromStr;

use blogfeed_core::{Error, Result};

use crate::model::ContentItem;

/// Sentinel category value that disables the category predicate.
pub const ALL_CATEGORIES: &str = "all";

// ============================================================================
// Category predicate
// ============================================================================

/// Active category filter.
///
/// Categories form an open set, so [`CategoryFilter::Only`] accepts any
/// label; an unknown label simply admits nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Admit every category.
    #[default]
    All,
    /// Admit only items whose category equals this label exactly.
    Only(String),
}

impl CategoryFilter {
    /// Whether `item` passes this filter.
    pub fn admits(&self, item: &ContentItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category() == category,
        }
    }

    /// The filter as the label a selection control would show.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(label: String) -> Self {
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(label)
        }
    }
}

impl From<Option<&str>> for CategoryFilter {
    fn from(label: Option<&str>) -> Self {
        label.map_or(Self::All, Self::from)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Text predicate
// ============================================================================

/// A field the text predicate can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    /// Post title.
    Title,
    /// Card description.
    Description,
    /// Full body text.
    Body,
    /// Author name.
    Author,
    /// Any single tag.
    Tags,
}

impl MatchField {
    /// Lowercase name used in configuration and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Body => "body",
            Self::Author => "author",
            Self::Tags => "tags",
        }
    }

    fn matches(self, item: &ContentItem, needle: &str) -> bool {
        match self {
            Self::Title => contains_folded(item.title(), needle),
            Self::Description => contains_folded(item.description(), needle),
            Self::Body => contains_folded(item.body(), needle),
            Self::Author => contains_folded(item.author(), needle),
            Self::Tags => item.tags().iter().any(|t| contains_folded(t, needle)),
        }
    }
}

impl FromStr for MatchField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "body" | "content" => Ok(Self::Body),
            "author" => Ok(Self::Author),
            "tags" | "tag" => Ok(Self::Tags),
            other => Err(Error::validation(format!("unknown search field '{other}'"))),
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, duplicate-free set of fields consulted by the text predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFields(Vec<MatchField>);

impl SearchFields {
    /// Build a set from arbitrary fields; repeats are dropped.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no field is given, since an empty set
    /// would make every non-empty query reject every item.
    pub fn new(fields: impl IntoIterator<Item = MatchField>) -> Result<Self> {
        let mut out = Vec::new();
        for field in fields {
            if !out.contains(&field) {
                out.push(field);
            }
        }
        if out.is_empty() {
            return Err(Error::validation("search field set cannot be empty"));
        }
        Ok(Self(out))
    }

    /// Title, description, and body: the public listing rule.
    pub fn listing() -> Self {
        Self(vec![MatchField::Title, MatchField::Description, MatchField::Body])
    }

    /// Title, description, and author: the admin dashboard rule.
    pub fn admin() -> Self {
        Self(vec![
            MatchField::Title,
            MatchField::Description,
            MatchField::Author,
        ])
    }

    /// Every searchable field.
    pub fn all() -> Self {
        Self(vec![
            MatchField::Title,
            MatchField::Description,
            MatchField::Body,
            MatchField::Author,
            MatchField::Tags,
        ])
    }

    /// Whether `field` is part of the set.
    pub fn contains(&self, field: MatchField) -> bool {
        self.0.contains(&field)
    }

    /// Iterate the fields in order.
    pub fn iter(&self) -> impl Iterator<Item = MatchField> + '_ {
        self.0.iter().copied()
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        Self::listing()
    }
}

impl FromStr for SearchFields {
    type Err = Error;

    /// Parse `listing`, `admin`, `all`, or a comma-separated field list.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "listing" => Ok(Self::listing()),
            "admin" => Ok(Self::admin()),
            "all" => Ok(Self::all()),
            list => Self::new(
                list.split(',')
                    .filter(|part| !part.trim().is_empty())
                    .map(MatchField::from_str)
                    .collect::<Result<Vec<_>>>()?,
            ),
        }
    }
}

impl fmt::Display for SearchFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(MatchField::as_str).collect();
        f.write_str(&names.join(","))
    }
}

/// Active search query.
///
/// Keeps the text as entered plus a lowercased copy used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    /// Create a query. Empty text disables the predicate.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// The query as entered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the predicate is disabled.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether `item` matches in at least one of `fields`.
    pub fn matches(&self, item: &ContentItem, fields: &SearchFields) -> bool {
        self.is_empty() || fields.iter().any(|f| f.matches(item, &self.needle))
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

// ============================================================================
// Pipeline
// ============================================================================

/// The full filter state: category, query, and the fields the query reads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedFilter {
    /// Category predicate, applied first.
    pub category: CategoryFilter,
    /// Text predicate.
    pub query: SearchQuery,
    /// Fields consulted by the text predicate.
    pub fields: SearchFields,
}

impl FeedFilter {
    /// Whether `item` passes both predicates.
    pub fn matches(&self, item: &ContentItem) -> bool {
        self.category.admits(item) && self.query.matches(item, &self.fields)
    }

    /// Whether neither predicate restricts anything.
    pub fn is_pass_through(&self) -> bool {
        self.category == CategoryFilter::All && self.query.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
