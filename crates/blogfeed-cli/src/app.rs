//! FeedCli application.
//!
//! Builds the data source once per invocation (snapshot-seeded memory
//! store wrapped in retries), loads a [`FeedSession`], and renders the
//! requested view.

use std::sync::Arc;

use blogfeed_core::traits::ConfigProvider;
use blogfeed_core::{Error, Result};
use blogfeed_engine::{FeedEngine, SearchFields, ALL_CATEGORIES};
use blogfeed_source::{DataSource, FeedSession, MemorySource, RetryingSource};
use tracing_subscriber::EnvFilter;

use crate::cli::{BaseCommand, CliArgs, ListArgs};
use crate::config::{FeedConfig, RetryConfig};
use crate::{config_handlers, output};

// ============================================================================
// FeedCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct FeedCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
    retry: RetryConfig,
    search_fields: SearchFields,
    categories: Vec<String>,
}

impl FeedCli<FeedConfig> {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = FeedConfig::load(args.config.as_deref())?;
        let search_fields = config.search_fields()?;
        let retry = config.retry.clone();
        let categories = config.source.categories.clone();
        Ok(Self::new(name, config)
            .with_retry(retry)
            .with_search_fields(search_fields)
            .with_categories(categories))
    }
}

impl<C: ConfigProvider> FeedCli<C> {
    /// Create a new CLI application with default retry and search settings.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
            retry: RetryConfig::default(),
            search_fields: SearchFields::default(),
            categories: Vec::new(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Override the default search fields.
    pub fn with_search_fields(mut self, fields: SearchFields) -> Self {
        self.search_fields = fields;
        self
    }

    /// Override the categories offered for new posts.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity
    /// flags. Library `log` records are forwarded to the same subscriber.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments, printing the result.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(BaseCommand::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(command) => {
                let out = self.execute(command).await?;
                println!("{out}");
                Ok(())
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    /// Execute a feed command and return its rendered output.
    ///
    /// `config` subcommands are rejected here; [`FeedCli::run`] handles
    /// them with the `--config` path in hand.
    pub async fn execute(&self, command: BaseCommand) -> Result<String> {
        match command {
            BaseCommand::Version => Ok(format!("{} {}", self.name, self.version)),
            BaseCommand::Health => {
                let source = self.open_source().await?;
                let posts = source.fetch_all(None, None).await?;
                Ok(format!(
                    "{}: healthy ({} reachable, {})",
                    self.name,
                    source.name(),
                    output::found_line(posts.len())
                ))
            }
            BaseCommand::List(list) => self.list(list).await,
            BaseCommand::Show { id, json } => {
                let session = self.open_session().await?;
                let post = session.detail(&id).await?;
                if json {
                    Ok(serde_json::to_string_pretty(&post)?)
                } else {
                    Ok(output::post_detail(&post))
                }
            }
            BaseCommand::Stats { json } => {
                let session = self.open_session().await?;
                let stats = session.engine().stats();
                if json {
                    Ok(serde_json::to_string_pretty(&stats)?)
                } else {
                    Ok(output::stats(&stats))
                }
            }
            BaseCommand::Categories { counts } => {
                let session = self.open_session().await?;
                if counts {
                    Ok(output::category_counts(&session.engine().categories()))
                } else {
                    Ok(session.categories().await.join("\n"))
                }
            }
            BaseCommand::Config(_) => Err(Error::config(
                "config commands need the --config path and print directly; use `run`",
            )),
        }
    }

    async fn list(&self, list: ListArgs) -> Result<String> {
        let mut session = self.open_session().await?;
        let engine = session.engine_mut();

        if let Some(fields) = list.fields.as_deref() {
            engine.set_search_fields(fields.parse::<SearchFields>()?);
        }
        engine.set_category_filter(list.category.as_deref().unwrap_or(ALL_CATEGORIES));
        engine.set_search_query(list.search.unwrap_or_default());

        let view = engine.view();
        tracing::debug!(
            "Listing {} of {} post(s) (category={}, query={:?})",
            view.len(),
            engine.len(),
            engine.category_filter(),
            engine.search_query()
        );
        if list.json {
            Ok(serde_json::to_string_pretty(&view)?)
        } else {
            Ok(output::post_list(&view))
        }
    }

    /// Build the data source described by the configuration.
    ///
    /// A configured snapshot that cannot be read is an error; without one
    /// the store starts empty. Configured categories replace the
    /// snapshot's own list.
    pub async fn open_source(&self) -> Result<Arc<dyn DataSource>> {
        let memory = match self.config.data_file()? {
            Some(path) => MemorySource::load(&path).await?,
            None => MemorySource::new(),
        };
        let memory = if self.categories.is_empty() {
            memory
        } else {
            memory.with_categories(self.categories.clone())
        };

        let source = RetryingSource::new(Arc::new(memory))
            .with_max_attempts(self.retry.max_attempts)
            .with_initial_delay(self.retry.initial_delay())
            .with_max_delay(self.retry.max_delay())
            .with_timeout(self.retry.timeout());
        Ok(Arc::new(source))
    }

    /// Open the source and load a session from it.
    pub async fn open_session(&self) -> Result<FeedSession> {
        let engine = FeedEngine::new().with_search_fields(self.search_fields.clone());
        let mut session = FeedSession::with_engine(self.open_source().await?, engine);
        session.load().await?;
        Ok(session)
    }
}

// ============================================================================
// Tests
// ============================================================================
