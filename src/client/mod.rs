//! Typed client for the WaterCrawl API.
//!
//! [`WatercrawlClient`] is split into one impl block per resource kind:
//! - `crawl` - crawl requests, results, scrape, legacy sitemap downloads
//! - `search` - search requests
//! - `sitemap` - sitemap requests
//!
//! Every operation attaches an [`ErrorContext`] naming itself and the job
//! it touched.

mod crawl;
mod search;
mod sitemap;

pub use crawl::{CrawlRef, ScrapeOutcome};
pub use search::DEFAULT_RESULT_LIMIT;

use serde::de::DeserializeOwned;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{ErrorContext, NetworkError, ResultExt, WatercrawlError, WatercrawlResult};
use crate::models::JobResource;
use crate::monitor::Monitor;
use crate::traits::HttpClient;
use crate::transport::Transport;

pub(crate) const CRAWL_REQUESTS_PATH: &str = "/api/v1/core/crawl-requests/";
pub(crate) const SEARCH_PATH: &str = "/api/v1/core/search/";
pub(crate) const SITEMAPS_PATH: &str = "/api/v1/core/sitemaps/";

/// Client for one API key against one WaterCrawl deployment.
///
/// # Example
///
/// ```ignore
/// use watercrawl::{ClientConfig, WatercrawlClient};
///
/// let client = WatercrawlClient::new(ClientConfig::from_env()?)?;
/// let page = client.list_crawl_requests(Some(1), None).await?;
/// for request in page {
///     println!("{} {}", request.uuid, request.status);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WatercrawlClient<C = ReqwestHttpClient> {
    transport: Transport<C>,
    config: ClientConfig,
}

impl WatercrawlClient<ReqwestHttpClient> {
    /// Create a client backed by reqwest.
    pub fn new(config: ClientConfig) -> WatercrawlResult<Self> {
        config.validate()?;
        let http = ReqwestHttpClient::from_config(&config)
            .map_err(|e| WatercrawlError::Network(NetworkError::from_http(e, &config.base_url)))?;
        Ok(Self::build(http, config))
    }

    /// Create a client from `WATERCRAWL_API_KEY` and `WATERCRAWL_BASE_URL`.
    pub fn from_env() -> WatercrawlResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<C: HttpClient> WatercrawlClient<C> {
    /// Create a client over any [`HttpClient`].
    pub fn with_http_client(config: ClientConfig, http: C) -> WatercrawlResult<Self> {
        config.validate()?;
        Ok(Self::build(http, config))
    }

    fn build(http: C, config: ClientConfig) -> Self {
        Self {
            transport: Transport::new(http, &config),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &Transport<C> {
        &self.transport
    }

    /// `page` defaults to 1 and `page_size` to the configured page size.
    fn page_query(&self, page: Option<u32>, page_size: Option<u32>) -> Vec<(&'static str, String)> {
        vec![
            ("page", page.unwrap_or(1).to_string()),
            ("page_size", page_size.unwrap_or(self.config.page_size).to_string()),
        ]
    }

    /// Open the status stream of the job at `{base_path}{id}/status/`.
    async fn open_monitor<S, R>(
        &self,
        operation: &str,
        base_path: &str,
        id: &str,
        prefetched: bool,
    ) -> WatercrawlResult<Monitor<S, R>>
    where
        S: DeserializeOwned + JobResource,
        R: DeserializeOwned,
    {
        let path = format!("{}{}/status/", base_path, id);
        let events = self
            .transport
            .open_stream(&path, &[("prefetched", prefetched.to_string())])
            .await
            .context(ErrorContext::new(operation).with_resource_id(id))?;
        Ok(Monitor::new(id, events))
    }
}

fn job_path(base_path: &str, id: &str) -> String {
    format!("{}{}/", base_path, id)
}

fn precondition(message: impl Into<String>) -> WatercrawlError {
    WatercrawlError::Precondition {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::config::ConfigError;

    #[test]
    fn test_with_http_client_validates_config() {
        let err = WatercrawlClient::with_http_client(ClientConfig::new(" "), MockHttpClient::new())
            .unwrap_err();
        assert!(matches!(
            err,
            WatercrawlError::Config(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_page_query_defaults() {
        let client = WatercrawlClient::with_http_client(
            ClientConfig::new("key").with_page_size(25),
            MockHttpClient::new(),
        )
        .unwrap();

        assert_eq!(
            client.page_query(None, None),
            vec![("page", "1".to_string()), ("page_size", "25".to_string())]
        );
        assert_eq!(
            client.page_query(Some(2), Some(5)),
            vec![("page", "2".to_string()), ("page_size", "5".to_string())]
        );
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let err = WatercrawlClient::new(ClientConfig::new("key").with_base_url("ftp://x"))
            .unwrap_err();
        assert_eq!(err.error_code(), "E_CONFIG");
    }

    #[test]
    fn test_job_path() {
        assert_eq!(
            job_path(SEARCH_PATH, "abc"),
            "/api/v1/core/search/abc/"
        );
    }
}
