//! Utility modules.
//!
//! # Modules
//!
//! - [`paths`]: Path resolution helpers (tilde expansion, base-relative paths)

pub mod paths;
