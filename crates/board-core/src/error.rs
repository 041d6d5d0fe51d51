//! Error types for the lookup path.

use thiserror::Error;

/// Result type alias for data-layer operations.
pub type QueryResult<T> = Result<T, QueryFailure>;

/// Failures from connecting to or querying the data layer.
///
/// The messages are for logs only. Handlers turn every variant into the
/// same generic notice and never render these strings.
#[derive(Debug, Error)]
pub enum QueryFailure {
    #[error("no data layer configured")]
    NotConfigured,

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("unsupported statement: {0}")]
    Unsupported(String),

    #[error("expected {expected} bound parameter(s), got {got}")]
    ParamCount { expected: usize, got: usize },

    #[error("query failed: {0}")]
    QueryFailed(String),
}

impl QueryFailure {
    /// Variant name for structured logs. Never carries request data.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryFailure::NotConfigured => "not_configured",
            QueryFailure::ConnectionFailed(_) => "connection_failed",
            QueryFailure::Unsupported(_) => "unsupported",
            QueryFailure::ParamCount { .. } => "param_count",
            QueryFailure::QueryFailed(_) => "query_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_omits_payload() {
        let failure = QueryFailure::QueryFailed("x' OR '1'='1".to_string());
        assert_eq!(failure.kind(), "query_failed");
        assert!(failure.to_string().contains("OR"));

        let failure = QueryFailure::Unsupported("SELECT secret".to_string());
        assert_eq!(failure.kind(), "unsupported");
        assert_eq!(QueryFailure::NotConfigured.kind(), "not_configured");
    }
}
