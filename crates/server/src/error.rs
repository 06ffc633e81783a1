//! Errors surfaced by the analytics service.

use data_loader::DataLoadError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while answering a query
///
/// The aggregation itself never fails; everything here comes from the
/// store, the deadline, or the blocking task running the query.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Store error: {0}")]
    Store(#[from] DataLoadError),

    #[error("Query {query} timed out after {after:?}")]
    Timeout { query: &'static str, after: Duration },

    #[error("Query task failed: {0}")]
    TaskFailed(String),
}

impl ServiceError {
    /// HTTP status an API layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Store(DataLoadError::StoreUnavailable(_)) => 503,
            ServiceError::Store(_) => 500,
            ServiceError::Timeout { .. } => 504,
            ServiceError::TaskFailed(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let unavailable = ServiceError::from(DataLoadError::StoreUnavailable("down".into()));
        assert_eq!(unavailable.status_code(), 503);

        let timeout = ServiceError::Timeout {
            query: "top_actors",
            after: Duration::from_millis(10),
        };
        assert_eq!(timeout.status_code(), 504);
        assert!(timeout.to_string().contains("top_actors"));

        assert_eq!(ServiceError::TaskFailed("panic".into()).status_code(), 500);
    }
}
