use serde_json::Value;

use super::{job_path, WatercrawlClient, SITEMAPS_PATH};
use crate::error::{ErrorContext, ResultExt, WatercrawlResult};
use crate::models::sitemap::CreateSitemapRequest;
use crate::models::{Page, SitemapOptions, SitemapOutputFormat, SitemapRequest};
use crate::monitor::Monitor;
use crate::traits::HttpClient;

impl<C: HttpClient> WatercrawlClient<C> {
    pub async fn list_sitemap_requests(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> WatercrawlResult<Page<SitemapRequest>> {
        self.transport
            .get(SITEMAPS_PATH, &self.page_query(page, page_size))
            .await
            .context(ErrorContext::new("list_sitemap_requests"))
    }

    pub async fn get_sitemap_request(
        &self,
        id: &str,
        prefetched: bool,
    ) -> WatercrawlResult<SitemapRequest> {
        self.transport
            .get(
                &job_path(SITEMAPS_PATH, id),
                &[("prefetched", prefetched.to_string())],
            )
            .await
            .context(ErrorContext::new("get_sitemap_request").with_resource_id(id))
    }

    pub async fn create_sitemap_request(
        &self,
        url: &str,
        options: &SitemapOptions,
    ) -> WatercrawlResult<SitemapRequest> {
        self.transport
            .post(SITEMAPS_PATH, &CreateSitemapRequest { url, options })
            .await
            .context(ErrorContext::new("create_sitemap_request"))
    }

    /// Create a sitemap request and wait for it to finish.
    pub async fn generate_sitemap(
        &self,
        url: &str,
        options: &SitemapOptions,
        prefetched: bool,
    ) -> WatercrawlResult<SitemapRequest> {
        let request = self.create_sitemap_request(url, options).await?;
        self.monitor_sitemap_request(&request.uuid, prefetched)
            .await?
            .wait_for_terminal()
            .await
            .context(ErrorContext::new("generate_sitemap").with_resource_id(&request.uuid))
    }

    pub async fn monitor_sitemap_request(
        &self,
        id: &str,
        prefetched: bool,
    ) -> WatercrawlResult<Monitor<SitemapRequest, Value>> {
        self.open_monitor("monitor_sitemap_request", SITEMAPS_PATH, id, prefetched)
            .await
    }

    pub async fn stop_sitemap_request(&self, id: &str) -> WatercrawlResult<()> {
        self.transport
            .delete(&job_path(SITEMAPS_PATH, id))
            .await
            .map(|_| ())
            .context(ErrorContext::new("stop_sitemap_request").with_resource_id(id))
    }

    /// Rendered sitemap of a finished request. Markdown comes back as a
    /// JSON string.
    pub async fn get_sitemap_results(
        &self,
        id: &str,
        format: SitemapOutputFormat,
    ) -> WatercrawlResult<Value> {
        let path = format!("{}{}/", job_path(SITEMAPS_PATH, id), format.path_segment());
        self.transport
            .get(&path, &[])
            .await
            .context(ErrorContext::new("get_sitemap_results").with_resource_id(id))
    }
}
