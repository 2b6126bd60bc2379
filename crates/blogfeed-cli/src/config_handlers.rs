//! Handler functions for `blogfeed config {path,get,set,init,export}`.
//!
//! `set` edits the TOML file through [`ConfigDocument`] and refuses to
//! write a value that would make the file fail to load.

use std::path::{Path, PathBuf};

use blogfeed_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::FeedConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Receives the raw `--config` path (not a loaded config) because some
/// commands (path, init) work before a config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => {
            println!("{}", cmd_config_get(config_path, &key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
        ConfigAction::Export { docker_env } => {
            let config = FeedConfig::load(config_path)?;
            for line in export_lines(&config, docker_env)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = FeedConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `blogfeed config init` to create it)");
    }
    Ok(())
}

/// The effective value of `key`, after file and environment are merged.
fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = FeedConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    lookup(&value, key)
        .map(display_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = FeedConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    let mut doc = ConfigDocument::open(&path)?;
    doc.set(key, infer_value(value))?;
    doc.save()?;

    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => FeedConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = FeedConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

fn export_lines(config: &FeedConfig, docker_env: bool) -> Result<Vec<String>> {
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect())
}

// ============================================================================
// ConfigDocument
// ============================================================================

/// An on-disk config file, edited as a TOML table.
struct ConfigDocument {
    path: PathBuf,
    root: toml::Table,
}

impl ConfigDocument {
    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config(format!(
                "Config file does not exist at {}. Run `blogfeed config init` first.",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let root = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    /// Set a dotted key, creating intermediate tables as needed.
    fn set(&mut self, key: &str, value: toml::Value) -> Result<()> {
        let mut parts: Vec<&str> = key.split('.').collect();
        let leaf = match parts.pop() {
            Some(leaf) if !leaf.is_empty() => leaf,
            _ => return Err(Error::config("Empty key path")),
        };

        let mut table = &mut self.root;
        for part in parts {
            let entry = table
                .entry(part)
                .or_insert(toml::Value::Table(toml::Table::new()));
            table = entry
                .as_table_mut()
                .ok_or_else(|| Error::config(format!("'{part}' is not a section")))?;
        }
        table.insert(leaf.to_string(), value);
        Ok(())
    }

    /// Render the document, failing if it no longer describes a valid config.
    fn render(&self) -> Result<String> {
        let toml_str =
            toml::to_string_pretty(&self.root).map_err(|e| Error::config(e.to_string()))?;
        let config: FeedConfig = toml::from_str(&toml_str)
            .map_err(|e| Error::config(format!("invalid value: {e}")))?;
        config.search_fields()?;
        Ok(toml_str)
    }

    fn save(&self) -> Result<()> {
        let toml_str = self.render()?;
        std::fs::write(&self.path, toml_str).map_err(|e| Error::io_with_path(e, &self.path))
    }
}

// ============================================================================
// TOML value helpers
// ============================================================================

fn lookup<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Parse command-line text into a TOML value: bool, integer, then string.
///
/// A comma list stays a string; `source.categories` reads it as a list.
fn infer_value(s: &str) -> toml::Value {
    match s {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => s
            .parse::<i64>()
            .map(toml::Value::Integer)
            .unwrap_or_else(|_| toml::Value::String(s.to_string())),
    }
}

fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
