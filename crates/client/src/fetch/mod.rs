//! HTTP fetch for scrape targets.
//!
//! One GET per call with fixed browser-like headers, an optional proxy, and a
//! hard timeout. Non-success statuses come back as `FetchError::Status` so the
//! orchestrator can branch between hard-fail and soft-degrade instead of
//! catching exceptions across an async boundary.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;

/// Default desktop-browser user agent sent with every fetch.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header value.
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: desktop Chrome).
    pub user_agent: String,

    /// Accept-Language header value (default: English-preferred).
    pub accept_language: String,

    /// Request timeout (default: 30s).
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Errors from a page fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Server answered with a non-success status.
    #[error("HTTP status {status}")]
    Status { status: u16 },

    /// Request timed out.
    #[error("request timeout")]
    Timeout,

    /// Connection or protocol failure with no status.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Proxy URL or client construction was rejected.
    #[error("client build error: {0}")]
    Build(Arc<reqwest::Error>),
}

impl FetchError {
    /// Numeric status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { FetchError::Timeout } else { FetchError::Network(Arc::new(err)) }
    }
}

/// Fetches one URL as markup text.
///
/// Object-safe so the orchestrator can be driven by a stub in tests.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url`, optionally through `proxy`, returning the body text.
    async fn fetch(&self, url: &str, proxy: Option<&str>) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher.
pub struct FetchClient {
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn build_client(&self, proxy: Option<&str>) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&self.config.user_agent)
            .timeout(self.config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true);

        // One proxy endpoint covers both http and https traffic.
        if let Some(proxy_url) = proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| FetchError::Build(Arc::new(e)))?;
            builder = builder.proxy(proxy);
        }

        builder.build().map_err(|e| FetchError::Build(Arc::new(e)))
    }
}

#[async_trait]
impl Fetcher for FetchClient {
    async fn fetch(&self, url: &str, proxy: Option<&str>) -> Result<String, FetchError> {
        // The proxy is a per-run input and reqwest pins proxies at client-build
        // time, so the client is rebuilt per call. Fetches are strictly
        // sequential, one cycle at a time.
        let client = self.build_client(proxy)?;

        let response = client
            .get(url)
            .header(header::ACCEPT_LANGUAGE, &self.config.accept_language)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }

        let text = response.text().await?;

        tracing::debug!("fetched {} ({} bytes)", url, text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert!(config.user_agent.contains("Chrome/120"));
        assert_eq!(config.accept_language, "en-US,en;q=0.9");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_status_accessor() {
        let err = FetchError::Status { status: 403 };
        assert_eq!(err.status(), Some(403));

        let err = FetchError::Timeout;
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = FetchError::Status { status: 404 };
        assert_eq!(err.to_string(), "HTTP status 404");
    }

    #[test]
    fn test_build_client_rejects_bad_proxy() {
        let client = FetchClient::new(FetchConfig::default());
        let result = client.build_client(Some("not a proxy url"));
        assert!(matches!(result, Err(FetchError::Build(_))));
    }

    #[test]
    fn test_build_client_with_proxy() {
        let client = FetchClient::new(FetchConfig::default());
        assert!(client.build_client(Some("http://proxy.local:8000")).is_ok());
        assert!(client.build_client(None).is_ok());
    }
}
