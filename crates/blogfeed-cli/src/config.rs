//! Configuration for the BlogFeed CLI.
//!
//! Provides the [`FeedConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `BLOGFEED_CONFIG` environment variable
//! 3. XDG default: `~/.config/blogfeed/config.toml`
//! 4. Built-in defaults
//!
//! Environment variables (`BLOGFEED_<SECTION>_<KEY>`) overlay the file.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use blogfeed_core::traits::ConfigProvider;
use blogfeed_core::util::paths::resolve_against;
use blogfeed_core::{Error, Result};
use blogfeed_engine::SearchFields;
use confyg::{Confygery, env};
use serde::{Deserialize, Deserializer, Serialize};

/// Environment variable prefix and XDG directory name.
pub const ENV_PREFIX: &str = "BLOGFEED";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the BlogFeed CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Project name, shown in command output.
    pub project_name: String,

    /// Base path that relative data paths resolve against.
    pub base_path: Option<String>,

    /// Where posts come from.
    pub source: SourceConfig,

    /// Retry and timeout policy for data-source calls.
    pub retry: RetryConfig,

    /// Search behaviour.
    pub search: SearchConfig,
}

/// Data-source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// JSON snapshot to seed the in-memory store from.
    pub data_file: Option<String>,

    /// Categories offered for new posts. Empty means the built-in six.
    #[serde(deserialize_with = "list_or_csv")]
    pub categories: Vec<String>,
}

/// Retry configuration. Delays are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per call, the first included.
    #[serde(deserialize_with = "lenient_number")]
    pub max_attempts: u32,

    /// Delay before the first retry.
    #[serde(deserialize_with = "lenient_number")]
    pub initial_delay_ms: u64,

    /// Upper bound on the delay between retries.
    #[serde(deserialize_with = "lenient_number")]
    pub max_delay_ms: u64,

    /// Per-attempt timeout; `0` disables it.
    #[serde(deserialize_with = "lenient_number")]
    pub timeout_ms: u64,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fields the text query reads: `listing`, `admin`, `all`, or a comma
    /// list such as `title,author,tags`.
    pub fields: String,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            project_name: "blogfeed".to_string(),
            base_path: None,
            source: SourceConfig::default(),
            retry: RetryConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 10_000,
            timeout_ms: 0,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fields: SearchFields::default().to_string(),
        }
    }
}

impl RetryConfig {
    /// Delay before the first retry.
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Upper bound on the delay between retries.
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    /// Per-attempt timeout, if enabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl FeedConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// Loading priority:
    /// 1. Explicit `config_path` (from `--config` flag)
    /// 2. `BLOGFEED_CONFIG` env var
    /// 3. XDG default: `~/.config/blogfeed/config.toml`
    /// 4. Built-in defaults
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path)
            && path.exists()
        {
            builder
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file: {e}")))?;
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("source");
        env_opts.add_section("retry");
        env_opts.add_section("search");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        config.search_fields()?;
        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        // 1. Explicit --config flag
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        // 2. BLOGFEED_CONFIG env var
        if let Ok(path) = std::env::var(format!("{ENV_PREFIX}_CONFIG")) {
            return Some(PathBuf::from(path));
        }

        // 3. XDG default
        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("blogfeed").join("config.toml"))
    }

    /// Parse the configured search fields.
    pub fn search_fields(&self) -> Result<SearchFields> {
        self.search
            .fields
            .parse::<SearchFields>()
            .map_err(|e| Error::config(format!("search.fields: {e}")))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `BLOGFEED_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for FeedConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(PathBuf::from(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn data_file(&self) -> Result<Option<PathBuf>> {
        match self.source.data_file.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(file) => Ok(Some(resolve_against(self.base_path()?, file))),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
///
/// Arrays become comma lists, the form [`list_or_csv`] reads back.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            let items: Vec<String> = arr
                .iter()
                .map(|v| match v {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            out.push((prefix.to_string(), items.join(",")));
        }
        toml::Value::String(s) => {
            out.push((prefix.to_string(), s.clone()));
        }
        other => {
            out.push((prefix.to_string(), other.to_string()));
        }
    }
}

/// Accept a number or its string form; environment overlays arrive as text.
fn lenient_number<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Accept a list or a comma-separated string.
fn list_or_csv<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Text(String),
    }

    let items = match Raw::deserialize(deserializer)? {
        Raw::List(items) => items,
        Raw::Text(s) => s.split(',').map(str::to_string).collect(),
    };
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

// ============================================================================
// Tests
// ============================================================================
