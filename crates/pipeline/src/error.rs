//! Pipeline error types.

use std::sync::Arc;

/// Errors from the pipeline orchestration run.
///
/// All of these are fatal to the run except where the caller catches them per
/// track; without an artist or a track list there is no meaningful partial
/// output to produce.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Actor run answered with a non-success status.
    #[error("actor run failed: HTTP {status}: {body}")]
    ActorStatus { status: u16, body: String },

    /// Actor run returned no dataset items.
    #[error("actor run returned no items")]
    EmptyDataset,

    /// Video metadata carried no usable artist field.
    #[error("could not extract artist name from video metadata")]
    MissingArtist,

    /// HTTP error response from a collaborator other than the actor API.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// LLM answer held no parseable JSON object.
    #[error("failed to parse LLM JSON: {0}")]
    LlmJson(String),

    /// LLM answer was missing a usable track list.
    #[error("LLM output is not in the expected format: {0}")]
    LlmFormat(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] chorus_core::config::ConfigError),
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { PipelineError::Timeout } else { PipelineError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::ActorStatus { status: 502, body: "upstream".into() };
        assert!(err.to_string().contains("502"));

        let err = PipelineError::MissingArtist;
        assert!(err.to_string().contains("artist name"));
    }
}
