//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (CHORUS_*)
//! 2. TOML config file (if CHORUS_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The scrape components never read this struct directly; the binaries load it
//! once at startup and pass the individual values down as explicit parameters.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (CHORUS_*)
/// 2. TOML config file (if CHORUS_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-Agent string sent with every page fetch.
    ///
    /// Set via CHORUS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header sent with every page fetch.
    ///
    /// Set via CHORUS_ACCEPT_LANGUAGE environment variable.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Page fetch timeout in milliseconds.
    ///
    /// Set via CHORUS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Proxy endpoint routed through for both http and https fetches.
    ///
    /// Set via CHORUS_PROXY_URL environment variable. Optional; fetches go
    /// direct when unset.
    #[serde(default)]
    pub proxy_url: Option<String>,

    /// Apify API token for remote actor invocations.
    ///
    /// Set via CHORUS_APIFY_TOKEN environment variable.
    /// Required only when the pipeline binary runs.
    #[serde(default)]
    pub apify_token: Option<String>,

    /// Base URL of the actor run API.
    ///
    /// Set via CHORUS_APIFY_BASE_URL environment variable.
    #[serde(default = "default_apify_base_url")]
    pub apify_base_url: String,

    /// Actor id of the video-metadata scraper.
    ///
    /// Set via CHORUS_YOUTUBE_ACTOR_ID environment variable.
    #[serde(default)]
    pub youtube_actor_id: String,

    /// Actor id of the deployed lyrics scraper.
    ///
    /// Set via CHORUS_GENIUS_ACTOR_ID environment variable.
    #[serde(default)]
    pub genius_actor_id: String,

    /// Base URL of the Ollama server used for album lookups.
    ///
    /// Set via CHORUS_OLLAMA_URL environment variable.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model name passed to Ollama.
    ///
    /// Set via CHORUS_LLM_MODEL environment variable.
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// Timeout for synchronous actor runs and LLM generations, in milliseconds.
    ///
    /// Set via CHORUS_ACTOR_TIMEOUT_MS environment variable.
    #[serde(default = "default_actor_timeout_ms")]
    pub actor_timeout_ms: u64,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .into()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_apify_base_url() -> String {
    "https://api.apify.com/v2/acts".into()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".into()
}

fn default_llm_model() -> String {
    "llama3.2:1b".into()
}

fn default_actor_timeout_ms() -> u64 {
    600_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            timeout_ms: default_timeout_ms(),
            proxy_url: None,
            apify_token: None,
            apify_base_url: default_apify_base_url(),
            youtube_actor_id: String::new(),
            genius_actor_id: String::new(),
            ollama_url: default_ollama_url(),
            llm_model: default_llm_model(),
            actor_timeout_ms: default_actor_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Page fetch timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Actor run timeout as Duration.
    pub fn actor_timeout(&self) -> Duration {
        Duration::from_millis(self.actor_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `CHORUS_`
    /// 2. TOML file from `CHORUS_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("CHORUS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("CHORUS_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the Apify token is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the token is not set.
    pub fn require_apify_token(&self) -> Result<&str, ConfigError> {
        self.apify_token.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "apify_token".into(),
            hint: "Set CHORUS_APIFY_TOKEN environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.accept_language, "en-US,en;q=0.9");
        assert_eq!(config.timeout_ms, 30_000);
        assert!(config.proxy_url.is_none());
        assert!(config.apify_token.is_none());
        assert_eq!(config.apify_base_url, "https://api.apify.com/v2/acts");
        assert!(config.youtube_actor_id.is_empty());
        assert!(config.genius_actor_id.is_empty());
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.llm_model, "llama3.2:1b");
        assert_eq!(config.actor_timeout_ms, 600_000);
    }

    #[test]
    fn test_timeout_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(30_000));
        assert_eq!(config.actor_timeout(), Duration::from_millis(600_000));
    }

    #[test]
    fn test_require_apify_token_missing() {
        let config = AppConfig::default();
        let result = config.require_apify_token();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_apify_token_present() {
        let config = AppConfig { apify_token: Some("test-token".into()), ..Default::default() };
        let result = config.require_apify_token();
        assert_eq!(result.unwrap(), "test-token");
    }
}
