//! Client configuration
//!
//! Shared by the web frontend and the CLI. Native builds persist it with
//! confy (`~/.config/habitquest/config.toml` or platform equivalent); the web
//! frontend builds it from defaults and compile-time overrides.

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::query::RetryPolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable that overrides `api_base_url`
pub const API_URL_ENV: &str = "HABITQUEST_API_URL";

const APP_NAME: &str = "habitquest";
const CONFIG_NAME: &str = "config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout. `None` leaves the transport default in place.
    /// Ignored in the browser.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub retry: RetryPolicy,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u32,
    /// Shorter search input does not hit the API
    #[serde(default = "default_min_search_len")]
    pub min_search_len: usize,
    /// Stored token for the CLI. The web frontend keeps its own in local storage.
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_search_debounce_ms() -> u32 {
    300
}

fn default_min_search_len() -> usize {
    2
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: None,
            retry: RetryPolicy::default(),
            search_debounce_ms: default_search_debounce_ms(),
            min_search_len: default_min_search_len(),
            auth_token: None,
        }
    }
}

impl ClientConfig {
    /// Replace the base url when `url` is present and non-blank
    pub fn with_api_base_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api_base_url = url.to_string();
        }
        self
    }

    /// Base url without trailing slash, checked to be an absolute http(s) url
    pub fn base_url(&self) -> Result<String, ApiError> {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        let invalid = || ApiError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
        };
        let parsed = reqwest::Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid());
        }
        Ok(trimmed.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Persistence (native only)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
mod persist {
    use super::*;
    use std::path::PathBuf;
    use thiserror::Error;

    /// Errors during configuration operations
    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("failed to load configuration")]
        Load(#[source] confy::ConfyError),

        #[error("failed to save configuration")]
        Save(#[source] confy::ConfyError),

        #[error("failed to locate configuration file")]
        Locate(#[source] confy::ConfyError),

        #[error(transparent)]
        InvalidUrl(#[from] ApiError),
    }

    impl ClientConfig {
        /// Load the stored configuration (defaults when none exists), then
        /// apply the `HABITQUEST_API_URL` override.
        pub fn load() -> Result<Self, ConfigError> {
            let config: Self = confy::load(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)?;
            let env_url = std::env::var(API_URL_ENV).ok();
            Ok(config.with_api_base_url(env_url.as_deref()))
        }

        pub fn save(&self) -> Result<(), ConfigError> {
            self.base_url()?;
            confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
        }

        pub fn path() -> Result<PathBuf, ConfigError> {
            confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use persist::ConfigError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.min_search_len, 2);
        assert_eq!(config.retry.max_retries, 3);
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base_url": "https://quest.example/api/"}"#).unwrap();
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.base_url().unwrap(), "https://quest.example/api");
    }

    #[test]
    fn blank_override_keeps_existing_url() {
        let config = ClientConfig::default().with_api_base_url(Some("   "));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        let config = ClientConfig::default().with_api_base_url(Some("https://a.example"));
        assert_eq!(config.api_base_url, "https://a.example");
    }

    #[test]
    fn rejects_non_http_urls() {
        let mut config = ClientConfig::default();
        config.api_base_url = "ftp://files.example".to_string();
        assert!(config.base_url().is_err());

        config.api_base_url = "not a url".to_string();
        assert!(config.base_url().is_err());
    }
}
