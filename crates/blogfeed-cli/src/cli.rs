//! CLI argument parsing and command definitions.
//!
//! `blogfeed [--config <path>] [--verbose|--quiet] <command>`

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "blogfeed", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "BLOGFEED_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<BaseCommand>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum BaseCommand {
    /// List posts, optionally filtered by category and search text.
    List(ListArgs),

    /// Show one post in full.
    Show {
        /// Post identifier.
        id: String,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show totals: posts, distinct categories, distinct authors.
    Stats {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List categories.
    Categories {
        /// Count the loaded posts per category instead of listing the
        /// categories offered for new posts.
        #[arg(long)]
        counts: bool,
    },

    /// Print version information.
    Version,

    /// Check that the data source can be reached.
    Health,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Filters for `list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only posts in this category ("all" shows every category).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Case-insensitive text to search for.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Fields to search: listing, admin, all, or a comma list
    /// (title,description,body,author,tags). Overrides `search.fields`.
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Print as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "retry.max_attempts").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "search.fields").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["test"]);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_flags() {
        let args = CliArgs::parse_from(["test", "--verbose", "--config", "/etc/blogfeed.toml"]);
        assert!(args.verbose);
        assert_eq!(args.config.as_deref(), Some("/etc/blogfeed.toml"));

        let args = CliArgs::parse_from(["test", "-q"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_list_command_default() {
        let args = CliArgs::parse_from(["test", "list"]);
        match args.command {
            Some(BaseCommand::List(list)) => {
                assert!(list.category.is_none());
                assert!(list.search.is_none());
                assert!(list.fields.is_none());
                assert!(!list.json);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_list_command_filters() {
        let args = CliArgs::parse_from([
            "test", "list", "-c", "Food", "--search", "pho", "-f", "admin", "--json",
        ]);
        match args.command {
            Some(BaseCommand::List(list)) => {
                assert_eq!(list.category.as_deref(), Some("Food"));
                assert_eq!(list.search.as_deref(), Some("pho"));
                assert_eq!(list.fields.as_deref(), Some("admin"));
                assert!(list.json);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_show_command() {
        let args = CliArgs::parse_from(["test", "show", "abc123"]);
        match args.command {
            Some(BaseCommand::Show { id, json }) => {
                assert_eq!(id, "abc123");
                assert!(!json);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_show_requires_id() {
        assert!(CliArgs::try_parse_from(["test", "show"]).is_err());
    }

    #[test]
    fn test_stats_and_categories_commands() {
        let args = CliArgs::parse_from(["test", "stats", "--json"]);
        assert!(matches!(
            args.command,
            Some(BaseCommand::Stats { json: true })
        ));

        let args = CliArgs::parse_from(["test", "categories", "--counts"]);
        assert!(matches!(
            args.command,
            Some(BaseCommand::Categories { counts: true })
        ));
    }

    #[test]
    fn test_version_and_health_commands() {
        let args = CliArgs::parse_from(["test", "version"]);
        assert!(matches!(args.command, Some(BaseCommand::Version)));

        let args = CliArgs::parse_from(["test", "health"]);
        assert!(matches!(args.command, Some(BaseCommand::Health)));
    }

    #[test]
    fn test_config_set_command() {
        let args = CliArgs::parse_from(["test", "config", "set", "search.fields", "admin"]);
        match args.command {
            Some(BaseCommand::Config(ConfigCommand {
                command: ConfigAction::Set { key, value },
            })) => {
                assert_eq!(key, "search.fields");
                assert_eq!(value, "admin");
            }
            _ => panic!("Expected Config Set command"),
        }
    }

    #[test]
    fn test_config_init_command() {
        let args = CliArgs::parse_from(["test", "config", "init", "--force"]);
        match args.command {
            Some(BaseCommand::Config(ConfigCommand {
                command: ConfigAction::Init { file, force },
            })) => {
                assert!(file.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_config_export_command() {
        let args = CliArgs::parse_from(["test", "config", "export", "--docker-env"]);
        assert!(matches!(
            args.command,
            Some(BaseCommand::Config(ConfigCommand {
                command: ConfigAction::Export { docker_env: true },
            }))
        ));
    }
}
