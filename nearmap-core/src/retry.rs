//! Fixed-delay retry for transient store and network failures.

use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Retry budget for one outbound call: a bounded number of attempts with a
/// fixed delay between them. Applied independently to each store query and
/// each outbound HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }
}

/// Run `op` until it succeeds or the attempt budget is exhausted, sleeping
/// the fixed delay between attempts. The final error is returned as-is.
///
/// `what` names the operation in retry logs.
pub async fn with_retry<T, E, Fut>(
    policy: RetryPolicy,
    mut op: impl FnMut() -> Fut,
    what: &str,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.attempts.max(1) => {
                tracing::warn!(attempt, operation = what, error = %e, "transient failure, retrying");
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
