//! Bounded retry for outbound calls
//!
//! Only transient failures (network errors, 429, 5xx) are retried. Anything
//! else fails immediately.

use std::future::Future;
use std::time::Duration;

use tokio_retry2::strategy::{jitter, ExponentialBackoff};
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

use roster_common::SyncConfig;
use roster_core::SourceResult;

/// Retry settings shared by the source clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: usize,
    /// First backoff is twice this value
    pub base_delay_ms: u64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 200,
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay_ms: config.retry_base_ms,
            ..Self::default()
        }
    }

    fn strategy(&self) -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(2)
            .factor(self.base_delay_ms.max(1))
            .max_delay(self.max_delay)
            .map(jitter)
            .take(self.max_retries)
    }

    /// Run `call`, retrying transient failures
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut call: F) -> SourceResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = SourceResult<T>>,
    {
        Retry::spawn(self.strategy(), || {
            let attempt = call();
            async move {
                match attempt.await {
                    Ok(value) => Ok(value),
                    Err(err) if err.is_transient() => {
                        warn!(operation, error = %err, "Transient source failure, will retry");
                        Err(RetryError::Transient {
                            err,
                            retry_after: None,
                        })
                    }
                    Err(err) => Err(RetryError::Permanent(err)),
                }
            }
        })
        .await
    }
}
