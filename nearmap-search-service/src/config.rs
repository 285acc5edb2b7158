//! Search pipeline configuration.

use nearmap_core::RetryPolicy;
use nearmap_search_protocol::DEFAULT_RESULT_COUNT;

/// Pipeline-level configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL that record image paths are resolved against.
    /// `None` passes stored paths through unchanged.
    pub media_base_url: Option<String>,

    /// Result cap when the caller does not send a count.
    pub default_count: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            media_base_url: None,
            default_count: DEFAULT_RESULT_COUNT,
        }
    }
}

/// Crowd service client configuration.
#[derive(Debug, Clone)]
pub struct CrowdConfig {
    /// Service endpoint, queried as `<address>?id=<comma-separated ids>`.
    pub address: String,

    /// Bearer token.
    pub token: String,

    /// Connection timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Retry budget per page request.
    pub retry: RetryPolicy,
}

impl CrowdConfig {
    pub fn new(address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: token.into(),
            connect_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the retry budget.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
