//! The feed engine: the authoritative in-memory collection plus filters.
//!
//! [`FeedEngine`] owns the items in base order (most recent first by caller
//! convention), the active [`CategoryFilter`], and the active
//! [`SearchQuery`]. [`FeedEngine::view`] recomputes the filtered view from
//! those three inputs on every call; nothing is cached.
//!
//! Every mutating operation validates before it touches state, so a failed
//! call leaves the engine exactly as it was.
//!
//! # Example
//!
//! ```
//! use blogfeed_engine::{ContentItem, FeedEngine};
//! use chrono::Utc;
//!
//! let mut feed = FeedEngine::new();
//! feed.replace_all(vec![
//!     ContentItem::new("1", "Pasta Night", Utc::now()).with_category("Food"),
//!     ContentItem::new("2", "Quantum Basics", Utc::now()).with_category("Science"),
//! ])?;
//!
//! feed.set_category_filter("Science");
//! let ids: Vec<&str> = feed.view().iter().map(|i| i.id()).collect();
//! assert_eq!(ids, ["2"]);
//! # Ok::<(), blogfeed_core::Error>(())
//! ```

use std::collections::HashSet;

use blogfeed_core::{Error, Result};

use crate::filter::{CategoryFilter, FeedFilter, SearchFields, SearchQuery};
use crate::model::ContentItem;
use crate::stats::{category_counts, CategoryCount, FeedStats};

/// In-memory feed with an order-preserving filtered view.
///
/// Mutations take `&mut self`, so at most one can be in flight at a time;
/// [`view`](Self::view) takes `&self` and never mutates.
#[derive(Debug, Clone, Default)]
pub struct FeedEngine {
    items: Vec<ContentItem>,
    filter: FeedFilter,
}

impl FeedEngine {
    /// Create an empty engine with default filters (`all`, empty query,
    /// listing search fields).
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `fields` for the text predicate.
    pub fn with_search_fields(mut self, fields: SearchFields) -> Self {
        self.filter.fields = fields;
        self
    }

    // ------------------------------------------------------------------------
    // Collection operations
    // ------------------------------------------------------------------------

    /// Replace the whole collection, keeping the order of `items`.
    ///
    /// Filters are left as they are.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if an item has an empty identifier or two
    /// items share one. The collection is unchanged on error.
    pub fn replace_all(&mut self, items: impl IntoIterator<Item = ContentItem>) -> Result<()> {
        let items: Vec<ContentItem> = items.into_iter().collect();
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            validate_id(item.id())?;
            if !seen.insert(item.id()) {
                return Err(Error::validation(format!(
                    "duplicate identifier '{}'",
                    item.id()
                )));
            }
        }
        log::debug!("replacing feed with {} items", items.len());
        self.items = items;
        Ok(())
    }

    /// Insert `item` at the front of the base order.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if the identifier is empty or already present.
    pub fn insert(&mut self, item: ContentItem) -> Result<()> {
        validate_id(item.id())?;
        if self.contains(item.id()) {
            return Err(Error::validation(format!(
                "duplicate identifier '{}'",
                item.id()
            )));
        }
        log::debug!("inserting item '{}'", item.id());
        self.items.insert(0, item);
        Ok(())
    }

    /// Replace the item stored under `id`, keeping its position.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `id` is absent; [`Error::Validation`] if
    /// `item` carries a different identifier.
    pub fn replace_one(&mut self, id: &str, item: ContentItem) -> Result<()> {
        let index = self.position(id)?;
        if item.id() != id {
            return Err(Error::validation(format!(
                "replacement for '{id}' carries identifier '{}'",
                item.id()
            )));
        }
        log::debug!("replacing item '{id}'");
        self.items[index] = item;
        Ok(())
    }

    /// Remove the item stored under `id` and return it.
    ///
    /// Remaining items keep their relative order.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `id` is absent.
    pub fn remove(&mut self, id: &str) -> Result<ContentItem> {
        let index = self.position(id)?;
        log::debug!("removing item '{id}'");
        Ok(self.items.remove(index))
    }

    /// Discard the collection (teardown). Filters are kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // ------------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------------

    /// Set the category filter. `"all"` disables it.
    ///
    /// Never fails: categories are an open set.
    pub fn set_category_filter(&mut self, category: impl Into<CategoryFilter>) {
        self.filter.category = category.into();
    }

    /// Set the search query. Empty text disables it.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.query = SearchQuery::new(query);
    }

    /// Change which fields the search query reads.
    pub fn set_search_fields(&mut self, fields: SearchFields) {
        self.filter.fields = fields;
    }

    /// Back to `all` and an empty query. Search fields are kept.
    pub fn reset_filters(&mut self) {
        self.filter.category = CategoryFilter::All;
        self.filter.query = SearchQuery::default();
    }

    /// Active category filter.
    pub fn category_filter(&self) -> &CategoryFilter {
        &self.filter.category
    }

    /// Active search query as entered.
    pub fn search_query(&self) -> &str {
        self.filter.query.as_str()
    }

    /// Fields the search query reads.
    pub fn search_fields(&self) -> &SearchFields {
        &self.filter.fields
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// The filtered view, in base order.
    pub fn view(&self) -> Vec<&ContentItem> {
        self.items
            .iter()
            .filter(|item| self.filter.matches(item))
            .collect()
    }

    /// All items in base order, ignoring filters.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Look up an item by identifier.
    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether an item with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of items in the collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dashboard totals over the whole collection.
    pub fn stats(&self) -> FeedStats {
        FeedStats::from_items(&self.items)
    }

    /// Per-category counts over the whole collection.
    pub fn categories(&self) -> Vec<CategoryCount> {
        category_counts(&self.items)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| Error::not_found(format!("no item with identifier '{id}'")))
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::validation("item identifier cannot be empty"));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap()
    }

    fn item(id: &str, category: &str, title: &str) -> ContentItem {
        ContentItem::new(id, title, at(1)).with_category(category)
    }

    fn ids(feed: &FeedEngine) -> Vec<&str> {
        feed.view().iter().map(|i| i.id()).collect()
    }

    fn sample() -> FeedEngine {
        let mut feed = FeedEngine::new();
        feed.replace_all(vec![
            item("1", "Food", "Pasta Night"),
            item("2", "Science", "Quantum Basics"),
            item("3", "Food", "Rust in the Kitchen"),
            item("4", "Travel", "Lisbon on Foot"),
        ])
        .unwrap();
        feed
    }

    // ------------------------------------------------------------------------
    // replace_all
    // ------------------------------------------------------------------------

    #[test]
    fn test_replace_all_preserves_order() {
        let feed = sample();
        assert_eq!(ids(&feed), vec!["1", "2", "3", "4"]);
        assert_eq!(feed.len(), 4);
    }

    #[test]
    fn test_replace_all_rejects_duplicates_without_mutation() {
        let mut feed = sample();
        let err = feed
            .replace_all(vec![item("9", "Food", "a"), item("9", "Food", "b")])
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ids(&feed), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_replace_all_rejects_empty_id() {
        let mut feed = sample();
        let err = feed
            .replace_all(vec![item("5", "Food", "a"), item("", "Food", "b")])
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(feed.len(), 4);
    }

    #[test]
    fn test_blank_identifier_is_opaque() {
        let mut feed = FeedEngine::new();
        feed.replace_all(vec![item(" ", "Food", "a")]).unwrap();
        assert_eq!(ids(&feed), [" "]);

        assert!(feed.insert(item("", "Food", "b")).unwrap_err().is_validation());
        feed.insert(item("  ", "Food", "c")).unwrap();
        assert_eq!(ids(&feed), ["  ", " "]);
    }

    #[test]
    fn test_replace_all_keeps_filters() {
        let mut feed = sample();
        feed.set_category_filter("Food");
        feed.replace_all(vec![item("7", "Food", "x"), item("8", "Sports", "y")])
            .unwrap();
        assert_eq!(feed.category_filter(), &CategoryFilter::from("Food"));
        assert_eq!(ids(&feed), vec!["7"]);
    }

    // ------------------------------------------------------------------------
    // insert
    // ------------------------------------------------------------------------

    #[test]
    fn test_insert_goes_to_front() {
        let mut feed = sample();
        feed.insert(item("5", "Science", "Black Holes")).unwrap();
        assert_eq!(ids(&feed)[0], "5");
        assert_eq!(feed.len(), 5);
    }

    #[test]
    fn test_insert_rejects_collision() {
        let mut feed = sample();
        let err = feed.insert(item("2", "Food", "Imposter")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(feed.get("2").unwrap().title(), "Quantum Basics");
    }

    #[test]
    fn test_insert_rejects_empty_id() {
        let mut feed = FeedEngine::new();
        assert!(feed.insert(item("", "Food", "x")).unwrap_err().is_validation());
        assert!(feed.is_empty());
    }

    // ------------------------------------------------------------------------
    // replace_one
    // ------------------------------------------------------------------------

    #[test]
    fn test_replace_one_keeps_position() {
        let mut feed = sample();
        let updated = item("3", "Food", "Rust in the Kitchen, revised").with_updated_at(at(2));
        feed.replace_one("3", updated).unwrap();
        assert_eq!(ids(&feed), vec!["1", "2", "3", "4"]);
        let stored = feed.get("3").unwrap();
        assert_eq!(stored.title(), "Rust in the Kitchen, revised");
        assert_eq!(stored.updated_at(), Some(at(2)));
    }

    #[test]
    fn test_replace_one_missing_is_not_found() {
        let mut feed = sample();
        let err = feed.replace_one("99", item("99", "Food", "x")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_replace_one_mismatched_id() {
        let mut feed = sample();
        let err = feed.replace_one("1", item("2", "Food", "x")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(feed.get("1").unwrap().title(), "Pasta Night");
        assert_eq!(feed.get("2").unwrap().title(), "Quantum Basics");
    }

    // ------------------------------------------------------------------------
    // remove
    // ------------------------------------------------------------------------

    #[test]
    fn test_remove_then_remove_again() {
        let mut feed = sample();
        let removed = feed.remove("2").unwrap();
        assert_eq!(removed.id(), "2");
        assert_eq!(ids(&feed), vec!["1", "3", "4"]);
        assert!(feed.remove("2").unwrap_err().is_not_found());
    }

    #[test]
    fn test_clear_keeps_filters() {
        let mut feed = sample();
        feed.set_search_query("pasta");
        feed.clear();
        assert!(feed.is_empty());
        assert!(feed.view().is_empty());
        assert_eq!(feed.search_query(), "pasta");
    }

    // ------------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------------

    #[test]
    fn test_category_filter() {
        let mut feed = sample();
        feed.set_category_filter("Food");
        assert_eq!(ids(&feed), vec!["1", "3"]);

        feed.set_category_filter("Astrology");
        assert!(feed.view().is_empty());

        feed.set_category_filter("all");
        assert_eq!(feed.view().len(), 4);
    }

    #[test]
    fn test_search_query() {
        let mut feed = sample();
        feed.set_search_query("RUST");
        assert_eq!(ids(&feed), vec!["3"]);

        feed.set_search_query("");
        assert_eq!(feed.view().len(), 4);
    }

    #[test]
    fn test_category_and_query_combine() {
        let mut feed = sample();
        feed.set_category_filter("Food");
        feed.set_search_query("kitchen");
        assert_eq!(ids(&feed), vec!["3"]);

        feed.set_category_filter("Travel");
        assert!(feed.view().is_empty());
    }

    #[test]
    fn test_worked_example() {
        let mut feed = FeedEngine::new();
        feed.replace_all(vec![
            item("1", "Food", "Pasta Night"),
            item("2", "Science", "Quantum Basics"),
        ])
        .unwrap();

        feed.set_category_filter("Science");
        assert_eq!(ids(&feed), vec!["2"]);

        feed.set_category_filter("all");
        feed.set_search_query("pasta");
        assert_eq!(ids(&feed), vec!["1"]);
    }

    #[test]
    fn test_search_fields_switch() {
        let mut feed = FeedEngine::new();
        feed.insert(
            ContentItem::new("1", "Hello", at(1))
                .with_author("Grace Hopper")
                .with_body("compilers"),
        )
        .unwrap();

        feed.set_search_query("hopper");
        assert!(feed.view().is_empty());

        feed.set_search_fields(SearchFields::admin());
        assert_eq!(ids(&feed), vec!["1"]);

        let feed = feed.with_search_fields(SearchFields::listing());
        assert!(feed.view().is_empty());
    }

    #[test]
    fn test_reset_filters() {
        let mut feed = sample().with_search_fields(SearchFields::admin());
        feed.set_category_filter("Food");
        feed.set_search_query("zzz");
        feed.reset_filters();
        assert_eq!(feed.view().len(), 4);
        assert_eq!(feed.search_fields(), &SearchFields::admin());
    }

    #[test]
    fn test_view_is_idempotent() {
        let mut feed = sample();
        feed.set_search_query("o");
        let first: Vec<ContentItem> = feed.view().into_iter().cloned().collect();
        let second: Vec<ContentItem> = feed.view().into_iter().cloned().collect();
        assert_eq!(first, second);
    }

    // ------------------------------------------------------------------------
    // Stats
    // ------------------------------------------------------------------------

    #[test]
    fn test_stats_ignore_filters() {
        let mut feed = sample();
        feed.set_category_filter("Science");
        let stats = feed.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.categories, 3);
        assert_eq!(feed.categories().len(), 3);
        assert_eq!(feed.categories()[0].category, "Food");
        assert_eq!(feed.categories()[0].count, 2);
    }
}
