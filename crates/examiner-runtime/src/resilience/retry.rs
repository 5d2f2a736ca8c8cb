//! Bounded retry with exponential backoff for oracle calls.
//!
//! Only transient failures (see [`ProviderError::is_transient`]) are retried.
//! With the default [`RetryConfig`] the operation runs exactly once. A rate
//! limit's `retry-after` stretches the next delay, capped at `max_delay`.

use std::future::Future;

use backon::{ExponentialBuilder, Retryable};

use crate::config::RetryConfig;
use crate::providers::ProviderError;

/// Run `operation`, retrying transient failures per `retry`.
pub async fn with_retry<F, Fut, T>(retry: &RetryConfig, operation: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let backoff = ExponentialBuilder::default()
        .with_min_delay(retry.min_delay)
        .with_max_delay(retry.max_delay)
        .with_max_times(retry.max_retries)
        .with_jitter();
    let max_delay = retry.max_delay;

    operation
        .retry(backoff)
        .when(ProviderError::is_transient)
        .adjust(move |err: &ProviderError, delay| {
            delay.map(|delay| match err {
                ProviderError::RateLimited {
                    retry_after: Some(after),
                } => delay.max((*after).min(max_delay)),
                _ => delay,
            })
        })
        .notify(|err: &ProviderError, delay| {
            tracing::warn!(error = %err, delay = ?delay, "Transient oracle failure, retrying");
        })
        .await
}
