//! Core traits for BlogFeed configuration.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where a feed
//! application keeps its data so the CLI and data-source layer do not
//! depend on one concrete configuration struct.

use std::path::PathBuf;

use crate::Result;

/// Trait for application configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use blogfeed_core::traits::ConfigProvider;
/// use blogfeed_core::Result;
///
/// #[derive(Clone)]
/// struct TravelBlogConfig {
///     data_dir: PathBuf,
/// }
///
/// impl ConfigProvider for TravelBlogConfig {
///     fn project_name(&self) -> &str {
///         "travel-blog"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.data_dir.clone())
///     }
///
///     fn data_file(&self) -> Result<Option<PathBuf>> {
///         Ok(Some(self.data_dir.join("posts.json")))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path to the feed snapshot the data source is seeded from.
    ///
    /// `None` means the application starts with an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured path cannot be resolved.
    fn data_file(&self) -> Result<Option<PathBuf>>;
}
