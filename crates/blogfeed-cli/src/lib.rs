//! Command-line interface for BlogFeed.
//!
//! # Key Abstractions
//!
//! - [`FeedCli<C>`](app::FeedCli): the application, generic over a
//!   [`ConfigProvider`](blogfeed_core::ConfigProvider)
//! - [`FeedConfig`](config::FeedConfig): file + environment configuration
//! - [`CliArgs`](cli::CliArgs): clap argument definitions

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod output;

pub use app::FeedCli;
pub use cli::{BaseCommand, CliArgs};
pub use config::FeedConfig;
