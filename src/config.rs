//! Client configuration
//!
//! Holds the base URL of the EventHub API and builds endpoint URLs.

use thiserror::Error;

/// Default API base URL, including the versioned base path
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/v1";

/// Environment variable that overrides the API base URL
const API_URL_ENV: &str = "EVENTHUB_API_URL";

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        let api_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self { api_url }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration pointing at an explicit base URL
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self, ConfigError> {
        let api_url = api_url.into();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(api_url));
        }
        // Trailing slash would double up when joined with endpoint paths
        let api_url = api_url.trim_end_matches('/').to_string();
        Ok(Self { api_url })
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.api_url
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
