//! Service configuration.

use analytics::facade::DEFAULT_PARALLEL_THRESHOLD;
use data_loader::DEFAULT_PER_PAGE;
use std::time::Duration;

/// Default per-query deadline
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables for [`crate::AnalyticsService`].
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Deadline for one query, fetch included; the result is dropped after it
    pub query_timeout: Duration,
    /// Page size for the movie list when the request has none
    pub default_per_page: i64,
    /// Snapshot size at which token counting goes parallel
    pub parallel_threshold: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            default_per_page: DEFAULT_PER_PAGE as i64,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ServiceConfig {
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_default_per_page(mut self, per_page: i64) -> Self {
        self.default_per_page = per_page;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
