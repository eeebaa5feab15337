//! Unified error types for chorus.

/// Unified error type shared across the chorus crates.
///
/// Transport failures during a scrape never surface here: the orchestrator
/// converts them into diagnostic record fields. What remains is the small set
/// of failures that genuinely stops a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty search query).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration loading or validation failed.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The output sink rejected a record (I/O or serialization).
    #[error("sink error: {0}")]
    Sink(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("search_query is required".to_string());
        assert!(err.to_string().contains("invalid input"));
        assert!(err.to_string().contains("search_query"));
    }

    #[test]
    fn test_sink_error_display() {
        let err = Error::Sink("broken pipe".to_string());
        assert!(err.to_string().contains("sink error"));
    }
}
