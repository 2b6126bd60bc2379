//! Retry and timeout wrapper for data sources.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use blogfeed_core::{Error, Result};
use blogfeed_engine::ContentItem;

use crate::fields::ItemFields;
use crate::provider::DataSource;

/// Wraps a data source with exponential-backoff retries and a per-call
/// timeout.
///
/// Only retryable errors (source failures and timeouts) are retried.
/// Validation and not-found errors are returned on the first attempt.
pub struct RetryingSource {
    inner: Arc<dyn DataSource>,
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
    timeout: Option<Duration>,
}

impl RetryingSource {
    /// Creates a new retry wrapper with default settings.
    ///
    /// Default settings:
    /// - Max attempts: 3 (the first call included)
    /// - Initial delay: 1 second
    /// - Max delay: 10 seconds
    /// - Timeout: none
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            inner: source,
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            timeout: None,
        }
    }

    /// Sets the maximum number of attempts. `0` behaves like `1`.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the initial delay between retries.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Bounds every individual attempt. `None` disables the bound.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Determines if an error should be retried.
    fn should_retry(error: &Error) -> bool {
        error.is_retryable()
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.initial_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_attempts.saturating_sub(1) as usize)
    }

    fn log_retry(&self, op: &str, err: &Error, delay: Duration) {
        log::warn!(
            "{} {op} failed ({err}); retrying in {} ms",
            self.inner.name(),
            delay.as_millis()
        );
    }

    async fn bounded<T>(&self, op: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        match self.timeout {
            None => call.await,
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                Error::timeout(format!(
                    "{} {op} exceeded {} ms",
                    self.inner.name(),
                    limit.as_millis()
                ))
            })?,
        }
    }
}

#[async_trait]
impl DataSource for RetryingSource {
    async fn fetch_all(
        &self,
        category_hint: Option<&str>,
        search_hint: Option<&str>,
    ) -> Result<Vec<ContentItem>> {
        let source = self.inner.clone();
        (|| async {
            self.bounded("fetch_all", source.fetch_all(category_hint, search_hint))
                .await
        })
        .retry(self.backoff())
        .when(Self::should_retry)
        .notify(|err, delay| self.log_retry("fetch_all", err, delay))
        .await
    }

    async fn get(&self, id: &str) -> Result<ContentItem> {
        let source = self.inner.clone();
        (|| async { self.bounded("get", source.get(id)).await })
            .retry(self.backoff())
            .when(Self::should_retry)
            .notify(|err, delay| self.log_retry("get", err, delay))
            .await
    }

    async fn create(&self, fields: ItemFields) -> Result<ContentItem> {
        let source = self.inner.clone();
        (|| async { self.bounded("create", source.create(fields.clone())).await })
            .retry(self.backoff())
            .when(Self::should_retry)
            .notify(|err, delay| self.log_retry("create", err, delay))
            .await
    }

    async fn update(&self, id: &str, fields: ItemFields) -> Result<ContentItem> {
        let source = self.inner.clone();
        (|| async { self.bounded("update", source.update(id, fields.clone())).await })
            .retry(self.backoff())
            .when(Self::should_retry)
            .notify(|err, delay| self.log_retry("update", err, delay))
            .await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let source = self.inner.clone();
        (|| async { self.bounded("remove", source.remove(id)).await })
            .retry(self.backoff())
            .when(Self::should_retry)
            .notify(|err, delay| self.log_retry("remove", err, delay))
            .await
    }

    async fn list_categories(&self) -> Result<Vec<String>> {
        let source = self.inner.clone();
        (|| async { self.bounded("list_categories", source.list_categories()).await })
            .retry(self.backoff())
            .when(Self::should_retry)
            .notify(|err, delay| self.log_retry("list_categories", err, delay))
            .await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
