//! Exponential back-off with jitter for collaborator calls.

use std::future::Future;
use std::time::Duration;

use crate::error::ProviderError;

const MAX_DELAY_MS: u64 = 30_000;

/// Transient failures: timeouts, connection errors, 5xx and 429.
pub(crate) fn is_retriable(err: &ProviderError) -> bool {
    match err {
        ProviderError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ProviderError::UnexpectedStatus { status, .. } => *status >= 500,
        ProviderError::RateLimited { .. } => true,
        ProviderError::Deserialize { .. }
        | ProviderError::Xml(_)
        | ProviderError::NotConfigured(_)
        | ProviderError::InvalidBaseUrl { .. } => false,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    let capped = computed.min(MAX_DELAY_MS);
    (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The delay doubles per attempt from `backoff_base_ms`, with ±25 % jitter,
/// capped at 30 s. A `Retry-After` hint replaces the computed delay.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = match &err {
                    ProviderError::RateLimited {
                        retry_after_secs: Some(secs),
                    } => secs.saturating_mul(1_000).min(MAX_DELAY_MS),
                    _ => backoff_delay_ms(backoff_base_ms, attempt),
                };
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient provider error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
