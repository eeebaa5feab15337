//! Remote actor invocation over the synchronous run API.
//!
//! One POST per invocation: the actor runs to completion and the response
//! body is its dataset, a JSON array of items. The token travels as a query
//! parameter.

use std::time::Duration;

use serde_json::Value;

use crate::error::PipelineError;

/// Client configuration for synchronous actor runs.
#[derive(Debug, Clone)]
pub struct ActorConfig {
    /// API token appended to every run request.
    pub token: String,
    /// Base URL of the actor run API.
    pub base_url: String,
    /// Timeout for one full synchronous run (default: 600s from AppConfig).
    pub timeout: Duration,
}

/// Client for synchronous actor runs returning dataset items.
pub struct ActorClient {
    http: reqwest::Client,
    config: ActorConfig,
}

impl ActorClient {
    /// Create a new actor client with the given configuration.
    pub fn new(config: ActorConfig) -> Result<Self, PipelineError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Run `actor_id` synchronously and return its dataset items.
    ///
    /// Non-success statuses surface the first 500 characters of the response
    /// body for diagnosis.
    pub async fn run_sync(&self, actor_id: &str, payload: &Value) -> Result<Vec<Value>, PipelineError> {
        let url = format!("{}/{}/run-sync-get-dataset-items", self.config.base_url, actor_id);

        tracing::debug!("invoking actor {}", actor_id);

        let response = self
            .http
            .post(&url)
            .query(&[("token", self.config.token.as_str())])
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(500).collect();
            tracing::warn!("actor run failed: {} {}", status.as_u16(), excerpt);
            return Err(PipelineError::ActorStatus { status: status.as_u16(), body: excerpt });
        }

        Ok(response.json().await?)
    }
}
