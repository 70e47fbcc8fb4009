//! Client configuration.
//!
//! Everything that would otherwise be a process-wide default lives on
//! [`ClientConfig`]: base URL, credential, page size and request timeout.

use std::time::Duration;

use thiserror::Error;

/// Default base URL of the WaterCrawl service.
pub const DEFAULT_BASE_URL: &str = "https://app.watercrawl.dev";

/// Page size used by list helpers when the caller does not pass one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "WATERCRAWL_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "WATERCRAWL_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// No API key was provided
    #[error("Missing API key: set WATERCRAWL_API_KEY")]
    MissingApiKey,

    /// Base URL is not an http(s) URL
    #[error("Invalid base URL '{0}': expected an http:// or https:// URL")]
    InvalidBaseUrl(String),

    /// Page size of zero
    #[error("Page size must be at least 1")]
    InvalidPageSize,
}

/// Configuration for a [`WatercrawlClient`](crate::client::WatercrawlClient).
///
/// Use the builder methods to customize it.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use watercrawl::config::ClientConfig;
///
/// let config = ClientConfig::new("my-api-key")
///     .with_base_url("http://localhost:8000")
///     .with_page_size(25)
///     .with_timeout(Duration::from_secs(30));
/// assert_eq!(config.page_size, 25);
/// ```
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL all API paths are joined against
    pub base_url: String,
    /// Credential sent as `X-API-KEY` on every API request
    pub api_key: String,
    /// Default page size for list helpers (default: 10)
    pub page_size: u32,
    /// Per-request timeout for buffered requests (default: none).
    /// Event streams are never subject to it.
    pub timeout: Option<Duration>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config for the given API key with default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: None,
            user_agent: format!("watercrawl-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Create config from `WATERCRAWL_API_KEY` and `WATERCRAWL_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::new(api_key.trim());
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config = config.with_base_url(base_url.trim());
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the config for values the client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
