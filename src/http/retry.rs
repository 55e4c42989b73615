//! Retry policies for HTTP requests.

use crate::error::HttpError;
use std::future::Future;
use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// No retries — used for non-idempotent POST endpoints by default.
    #[default]
    None,
    /// Retry on transport failures + 429/502/503/504, with backoff.
    /// Default for listing endpoints.
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add jitter to the delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
    /// Retry every failure regardless of kind or status, except a response
    /// body that does not decode.
    pub retry_any_error: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    /// The default config for idempotent (GET) requests.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
            retry_any_error: false,
        }
    }

    /// Fixed-delay policy: every failure except an undecodable body is
    /// retried after the same pause.
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay: delay,
            max_delay: delay,
            backoff_factor: 1.0,
            jitter: false,
            retryable_statuses: Vec::new(),
            retry_any_error: true,
        }
    }

    /// The price-history policy: 3 retries, 2 s apart.
    pub fn price_history() -> Self {
        Self::fixed(3, Duration::from_millis(2000))
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }

    /// Whether `error` is worth another attempt under this config.
    pub fn should_retry(&self, error: &HttpError) -> bool {
        // The same request returns the same malformed body.
        if matches!(error, HttpError::Decode(_)) {
            return false;
        }
        if self.retry_any_error {
            return true;
        }
        match error {
            HttpError::ServerError { status, .. } => self.retryable_statuses.contains(status),
            HttpError::RateLimited { .. } => self.retryable_statuses.contains(&429),
            HttpError::Timeout => true,
            HttpError::Reqwest(re) => {
                #[cfg(not(target_arch = "wasm32"))]
                let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                #[cfg(target_arch = "wasm32")]
                let retryable = re.is_timeout() || re.is_request();
                retryable
            }
            _ => false,
        }
    }
}

/// Run `op` until it succeeds or the retry budget is spent.
///
/// `target` only labels log lines. A non-retryable error is returned as-is;
/// a retryable error that survives every attempt becomes
/// [`HttpError::MaxRetriesExceeded`].
pub async fn retry_with<T, F, Fut>(
    config: &RetryConfig,
    target: &str,
    mut op: F,
) -> Result<T, HttpError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, HttpError>>,
{
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        match op().await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                if !config.should_retry(&e) {
                    return Err(e);
                }

                if attempt < config.max_retries {
                    let mut delay = config.delay_for_attempt(attempt);
                    if let HttpError::RateLimited {
                        retry_after_ms: Some(ms),
                    } = &e
                    {
                        delay = delay.max(Duration::from_millis(*ms));
                    }
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying request to {}",
                        target
                    );
                    futures_timer::Delay::new(delay).await;
                }
                last_error = Some(e);
            }
        }
    }

    tracing::warn!(
        attempts = config.max_retries + 1,
        "Giving up on request to {}",
        target
    );
    Err(HttpError::MaxRetriesExceeded {
        attempts: config.max_retries + 1,
        last_error: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    })
}
