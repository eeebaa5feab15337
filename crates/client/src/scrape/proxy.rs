//! Proxy provisioning seam.

use async_trait::async_trait;
use chorus_core::Error;

/// Hands out a proxy endpoint for the next run, if one is available.
///
/// Failure here is never fatal: the orchestrator logs it and goes direct.
#[async_trait]
pub trait ProxyProvider: Send + Sync {
    /// A proxy URL to route the run through, or `None` to go direct.
    async fn new_proxy_url(&self) -> Result<Option<String>, Error>;
}

/// Provider backed by a fixed, optionally absent, configured proxy URL.
#[derive(Debug, Clone, Default)]
pub struct FixedProxy {
    url: Option<String>,
}

impl FixedProxy {
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }
}

#[async_trait]
impl ProxyProvider for FixedProxy {
    async fn new_proxy_url(&self) -> Result<Option<String>, Error> {
        Ok(self.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_proxy_some() {
        let proxy = FixedProxy::new(Some("http://proxy.local:8000".into()));
        let url = proxy.new_proxy_url().await.unwrap();
        assert_eq!(url.as_deref(), Some("http://proxy.local:8000"));
    }

    #[tokio::test]
    async fn test_fixed_proxy_none() {
        let proxy = FixedProxy::default();
        assert!(proxy.new_proxy_url().await.unwrap().is_none());
    }
}
