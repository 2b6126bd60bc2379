//! In-memory content feed with a category + text filter pipeline.
//!
//! # Modules
//!
//! - [`model`]: [`ContentItem`] and its duplicate-free [`Tags`]
//! - [`filter`]: category predicate, text predicate, search field presets
//! - [`engine`]: [`FeedEngine`], the authoritative collection and its view
//! - [`stats`]: dashboard counters

#![doc = include_str!("../README.md")]

pub mod engine;
pub mod filter;
pub mod model;
pub mod stats;

pub use engine::FeedEngine;
pub use filter::{
    CategoryFilter, FeedFilter, MatchField, SearchFields, SearchQuery, ALL_CATEGORIES,
};
pub use model::{ContentItem, Tags};
pub use stats::{category_counts, CategoryCount, FeedStats};
