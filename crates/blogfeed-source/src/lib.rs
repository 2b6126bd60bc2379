//! Data sources for BlogFeed and the session that ties one to a feed engine.
//!
//! # Modules
//!
//! - [`provider`]: the [`DataSource`] trait
//! - [`fields`]: create/update payloads and form validation
//! - [`memory`]: [`MemorySource`], an in-memory store seeded from JSON
//! - [`retry`]: [`RetryingSource`], backoff and per-call timeouts
//! - [`session`]: [`FeedSession`], the load cycle and write-through

#![doc = include_str!("../README.md")]

pub mod fields;
pub mod memory;
pub mod provider;
pub mod retry;
pub mod session;

pub use fields::{FieldErrors, ItemFields};
pub use memory::{MemorySource, DEFAULT_CATEGORIES};
pub use provider::DataSource;
pub use retry::RetryingSource;
pub use session::FeedSession;
