use std::future::Future;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum GatewayCallError {
    #[error("gateway call timed out")]
    Timeout,
    #[error("gateway returned HTTP {0}")]
    Http(u16),
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Fatal(String),
}

impl GatewayCallError {
    /// Only timeouts, connection-level failures and HTTP 5xx are retried;
    /// everything else propagates on first occurrence.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayCallError::Timeout | GatewayCallError::Transport(_) => true,
            GatewayCallError::Http(status) => *status >= 500,
            GatewayCallError::Fatal(_) => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(8_000),
            retries: 2,
            retry_delay: Duration::from_millis(350),
        }
    }
}

/// Runs one remote gateway operation under a deadline, retrying transient
/// failures with linear backoff (`retry_delay * attempt`). Every attempt
/// resubmits the same payload; `call` must not vary idempotency-relevant
/// fields between attempts.
///
/// The attempt is spawned so the deadline race does not cancel the underlying
/// network operation: a result that arrives after the deadline is dropped,
/// never applied.
pub async fn execute<T, F, Fut>(
    settings: &ExecutorSettings,
    mut call: F,
) -> Result<T, GatewayCallError>
where
    T: Send + 'static,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GatewayCallError>> + Send + 'static,
{
    let mut last = GatewayCallError::Timeout;
    for attempt in 1..=settings.retries + 1 {
        let in_flight = tokio::spawn(call());
        match tokio::time::timeout(settings.timeout, in_flight).await {
            Ok(Ok(Ok(value))) => return Ok(value),
            Ok(Ok(Err(err))) => {
                if !err.is_transient() {
                    return Err(err);
                }
                last = err;
            }
            Ok(Err(join_err)) => return Err(GatewayCallError::Fatal(join_err.to_string())),
            Err(_) => {
                // the spawned call keeps running; its late result is discarded
                last = GatewayCallError::Timeout;
            }
        }
        if attempt <= settings.retries {
            tokio::time::sleep(settings.retry_delay * attempt).await;
        }
    }
    Err(last)
}
