//! Dashboard counters over a collection of items.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::ContentItem;

/// Totals shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedStats {
    /// Number of items.
    pub total: usize,
    /// Number of distinct categories.
    pub categories: usize,
    /// Number of distinct authors.
    pub authors: usize,
}

impl FeedStats {
    /// Compute the totals for `items`.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a ContentItem>) -> Self {
        let mut total = 0;
        let mut categories = HashSet::new();
        let mut authors = HashSet::new();
        for item in items {
            total += 1;
            categories.insert(item.category());
            authors.insert(item.author());
        }
        Self {
            total,
            categories: categories.len(),
            authors: authors.len(),
        }
    }
}

/// Number of items carrying one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category label.
    pub category: String,
    /// Items in this category.
    pub count: usize,
}

/// Per-category counts, in the order each category is first seen.
pub fn category_counts<'a>(items: impl IntoIterator<Item = &'a ContentItem>) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|c| c.category == item.category()) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: item.category().to_string(),
                count: 1,
            }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: &str, category: &str, author: &str) -> ContentItem {
        ContentItem::new(id, id, Utc::now())
            .with_category(category)
            .with_author(author)
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(FeedStats::from_items(std::iter::empty()), FeedStats::default());
    }

    #[test]
    fn test_stats_distinct_counts() {
        let items = vec![
            item("1", "Food", "Ada"),
            item("2", "Science", "Ada"),
            item("3", "Food", "Grace"),
        ];
        let stats = FeedStats::from_items(&items);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.authors, 2);
    }

    #[test]
    fn test_category_counts_first_seen_order() {
        let items = vec![
            item("1", "Travel", "a"),
            item("2", "Food", "b"),
            item("3", "Travel", "c"),
        ];
        let counts = category_counts(&items);
        assert_eq!(
            counts,
            vec![
                CategoryCount {
                    category: "Travel".into(),
                    count: 2
                },
                CategoryCount {
                    category: "Food".into(),
                    count: 1
                },
            ]
        );
    }
}
