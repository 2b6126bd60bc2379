//! BlogFeed Core: shared errors, traits, and utilities.
//!
//! This crate provides the foundational types used across all BlogFeed
//! crates. It has no internal BlogFeed dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`traits`]: Configuration abstraction
//! - [`util`]: Path helpers

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;
