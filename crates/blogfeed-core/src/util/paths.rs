//! Path resolution utilities.

use std::path::{Path, PathBuf};

/// Expands `~` to the user's home directory.
///
/// If the path starts with `~`, replaces it with the user's home directory.
/// Otherwise returns the path unchanged.
///
/// # Example
///
/// ```
/// use blogfeed_core::util::paths::expand_tilde;
///
/// let expanded = expand_tilde("~/posts.json");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Resolve `path` against `base`.
///
/// Tilde is expanded first; absolute results are returned as-is,
/// relative ones are joined onto `base`.
pub fn resolve_against<B: AsRef<Path>, P: AsRef<Path>>(base: B, path: P) -> PathBuf {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() {
        expanded
    } else {
        base.as_ref().join(expanded)
    }
}
