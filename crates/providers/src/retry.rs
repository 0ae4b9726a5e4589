//! Bounded retry with backoff around a provider.
//!
//! The model-completion call is the only unbounded blocking operation in a
//! review run, so it gets an explicit per-attempt timeout and a bounded
//! retry policy. Only transient failures are retried; authentication and
//! malformed-response errors pass straight through.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use deckproof_core::error::ProviderError;
use deckproof_core::provider::{Provider, ProviderRequest, ProviderResponse};

/// A provider that retries transient failures with exponential backoff.
pub struct RetryProvider {
    inner: Arc<dyn Provider>,
    max_attempts: u32,
    attempt_timeout: Duration,
    base_backoff: Duration,
}

impl RetryProvider {
    pub fn new(inner: Arc<dyn Provider>, max_attempts: u32, attempt_timeout: Duration) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            attempt_timeout,
            base_backoff: Duration::from_millis(500),
        }
    }

    /// Override the first backoff interval (doubled on each retry).
    pub fn with_base_backoff(mut self, base: Duration) -> Self {
        self.base_backoff = base;
        self
    }

    fn backoff_for(&self, attempt: u32) -> Duration {
        // attempt is 1-based; first retry waits base, then doubles
        self.base_backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

#[async_trait]
impl Provider for RetryProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let mut last_error =
            ProviderError::NotConfigured("retry provider made no attempts".into());

        for attempt in 1..=self.max_attempts {
            match tokio::time::timeout(self.attempt_timeout, self.inner.complete(request.clone()))
                .await
            {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err(e)) if e.is_transient() => {
                    warn!(
                        provider = %self.inner.name(),
                        attempt,
                        max = self.max_attempts,
                        error = %e,
                        "Transient provider failure"
                    );
                    last_error = e;
                }
                Ok(Err(e)) => return Err(e),
                Err(_) => {
                    warn!(
                        provider = %self.inner.name(),
                        attempt,
                        timeout_secs = self.attempt_timeout.as_secs(),
                        "Provider attempt timed out"
                    );
                    last_error = ProviderError::Timeout(format!(
                        "attempt {attempt} timed out after {}s",
                        self.attempt_timeout.as_secs()
                    ));
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.backoff_for(attempt)).await;
            }
        }

        Err(last_error)
    }
}
