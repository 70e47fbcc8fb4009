use serde_json::Value;

use super::{job_path, precondition, WatercrawlClient, CRAWL_REQUESTS_PATH};
use crate::error::{ErrorContext, ResultExt, WatercrawlResult};
use crate::models::crawl::{CreateBatchCrawlRequest, CreateCrawlRequest};
use crate::models::{
    CrawlOptions, CrawlRequest, CrawlResult, Page, PageOptions, PluginOptions, ResultPayload,
    SitemapNode, SpiderOptions,
};
use crate::monitor::{Monitor, Outcome};
use crate::traits::HttpClient;

/// A crawl given either by id or as an already fetched request.
#[derive(Debug, Clone, Copy)]
pub enum CrawlRef<'a> {
    Id(&'a str),
    Request(&'a CrawlRequest),
}

impl<'a> From<&'a str> for CrawlRef<'a> {
    fn from(id: &'a str) -> Self {
        CrawlRef::Id(id)
    }
}

impl<'a> From<&'a CrawlRequest> for CrawlRef<'a> {
    fn from(request: &'a CrawlRequest) -> Self {
        CrawlRef::Request(request)
    }
}

/// Result of [`WatercrawlClient::scrape_url`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeOutcome {
    /// `sync` was false: the created request, not yet finished
    Pending(CrawlRequest),
    /// The scraped page
    Result(CrawlResult),
    /// The crawl ended without producing a page
    Finished(CrawlRequest),
}

impl<C: HttpClient> WatercrawlClient<C> {
    /// List crawl requests, newest first.
    pub async fn list_crawl_requests(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> WatercrawlResult<Page<CrawlRequest>> {
        self.transport
            .get(CRAWL_REQUESTS_PATH, &self.page_query(page, page_size))
            .await
            .context(ErrorContext::new("list_crawl_requests"))
    }

    pub async fn get_crawl_request(&self, id: &str) -> WatercrawlResult<CrawlRequest> {
        self.transport
            .get(&job_path(CRAWL_REQUESTS_PATH, id), &[])
            .await
            .context(ErrorContext::new("get_crawl_request").with_resource_id(id))
    }

    pub async fn create_crawl_request(
        &self,
        url: &str,
        spider_options: SpiderOptions,
        page_options: PageOptions,
        plugin_options: PluginOptions,
    ) -> WatercrawlResult<CrawlRequest> {
        let options = CrawlOptions {
            spider_options,
            page_options,
            plugin_options,
        };
        self.transport
            .post(
                CRAWL_REQUESTS_PATH,
                &CreateCrawlRequest {
                    url,
                    options: &options,
                },
            )
            .await
            .context(ErrorContext::new("create_crawl_request"))
    }

    /// Crawl several seed URLs as one job.
    pub async fn create_batch_crawl_request(
        &self,
        urls: &[String],
        spider_options: SpiderOptions,
        page_options: PageOptions,
        plugin_options: PluginOptions,
    ) -> WatercrawlResult<CrawlRequest> {
        let options = CrawlOptions {
            spider_options,
            page_options,
            plugin_options,
        };
        let path = format!("{}batch/", CRAWL_REQUESTS_PATH);
        self.transport
            .post(
                &path,
                &CreateBatchCrawlRequest {
                    urls,
                    options: &options,
                },
            )
            .await
            .context(ErrorContext::new("create_batch_crawl_request"))
    }

    pub async fn stop_crawl_request(&self, id: &str) -> WatercrawlResult<()> {
        self.transport
            .delete(&job_path(CRAWL_REQUESTS_PATH, id))
            .await
            .map(|_| ())
            .context(ErrorContext::new("stop_crawl_request").with_resource_id(id))
    }

    /// Every result of a crawl in one response.
    pub async fn download_crawl_request(&self, id: &str) -> WatercrawlResult<Vec<CrawlResult>> {
        let path = format!("{}download/", job_path(CRAWL_REQUESTS_PATH, id));
        self.transport
            .get(&path, &[])
            .await
            .context(ErrorContext::new("download_crawl_request").with_resource_id(id))
    }

    /// Open the status stream of a crawl.
    ///
    /// With `prefetched` set, result events carry the page content instead
    /// of a URL to fetch.
    pub async fn monitor_crawl_request(
        &self,
        id: &str,
        prefetched: bool,
    ) -> WatercrawlResult<Monitor<CrawlRequest, CrawlResult>> {
        self.open_monitor("monitor_crawl_request", CRAWL_REQUESTS_PATH, id, prefetched)
            .await
    }

    pub async fn get_crawl_request_results(
        &self,
        id: &str,
        page: Option<u32>,
        page_size: Option<u32>,
        prefetched: bool,
    ) -> WatercrawlResult<Page<CrawlResult>> {
        let path = format!("{}results/", job_path(CRAWL_REQUESTS_PATH, id));
        let mut query = self.page_query(page, page_size);
        query.push(("prefetched", prefetched.to_string()));
        self.transport
            .get(&path, &query)
            .await
            .context(ErrorContext::new("get_crawl_request_results").with_resource_id(id))
    }

    /// Content of one result. Inlined content is returned as is; a URL is
    /// fetched with a plain GET.
    pub async fn download_result(&self, result: &CrawlResult) -> WatercrawlResult<Value> {
        let ctx = || ErrorContext::new("download_result").with_resource_id(&result.uuid);
        match &result.result {
            Some(ResultPayload::Inline(value)) => Ok(value.clone()),
            Some(ResultPayload::Url(url)) => {
                self.transport.fetch_absolute(url).await.with_context(ctx)
            }
            None => Err(precondition("Result has no content or content URL")).context(ctx()),
        }
    }

    /// Crawl a single page.
    ///
    /// With `sync` set, waits for the page and returns it; the connection is
    /// closed as soon as the page arrives.
    pub async fn scrape_url(
        &self,
        url: &str,
        page_options: PageOptions,
        plugin_options: PluginOptions,
        sync: bool,
        prefetched: bool,
    ) -> WatercrawlResult<ScrapeOutcome> {
        let spider_options = SpiderOptions::default().with_max_depth(0).with_page_limit(1);
        let request = self
            .create_crawl_request(url, spider_options, page_options, plugin_options)
            .await?;
        if !sync {
            return Ok(ScrapeOutcome::Pending(request));
        }

        let monitor = self.monitor_crawl_request(&request.uuid, prefetched).await?;
        let outcome = monitor
            .wait_for_outcome()
            .await
            .context(ErrorContext::new("scrape_url").with_resource_id(&request.uuid))?;
        Ok(match outcome {
            Outcome::Result(result) => ScrapeOutcome::Result(result),
            Outcome::Terminal(request) => ScrapeOutcome::Finished(request),
        })
    }

    /// Sitemap of a finished crawl, fetched from its `sitemap` URL.
    pub async fn download_sitemap<'a>(
        &self,
        crawl: impl Into<CrawlRef<'a>>,
    ) -> WatercrawlResult<Vec<SitemapNode>> {
        let request = self.crawl_with_sitemap(crawl.into(), "download_sitemap").await?;
        let ctx = || ErrorContext::new("download_sitemap").with_resource_id(&request.uuid);
        let url = request
            .sitemap
            .as_deref()
            .ok_or_else(|| precondition("Sitemap URL is missing"))
            .with_context(ctx)?;
        let value = self.transport.fetch_absolute(url).await.with_context(ctx)?;
        serde_json::from_value(value).with_context(ctx)
    }

    /// Sitemap of a crawl as a graph.
    pub async fn download_sitemap_graph<'a>(
        &self,
        crawl: impl Into<CrawlRef<'a>>,
    ) -> WatercrawlResult<Value> {
        let request = self
            .crawl_with_sitemap(crawl.into(), "download_sitemap_graph")
            .await?;
        let path = format!("{}sitemap/graph/", job_path(CRAWL_REQUESTS_PATH, &request.uuid));
        self.transport
            .get(&path, &[])
            .await
            .context(ErrorContext::new("download_sitemap_graph").with_resource_id(&request.uuid))
    }

    /// Sitemap of a crawl as a markdown document.
    pub async fn download_sitemap_markdown<'a>(
        &self,
        crawl: impl Into<CrawlRef<'a>>,
    ) -> WatercrawlResult<String> {
        let request = self
            .crawl_with_sitemap(crawl.into(), "download_sitemap_markdown")
            .await?;
        let path = format!(
            "{}sitemap/markdown/",
            job_path(CRAWL_REQUESTS_PATH, &request.uuid)
        );
        let ctx = || {
            ErrorContext::new("download_sitemap_markdown").with_resource_id(&request.uuid)
        };
        let value: Value = self.transport.get(&path, &[]).await.with_context(ctx)?;
        Ok(match value {
            Value::String(markdown) => markdown,
            other => other.to_string(),
        })
    }

    /// Resolve `crawl` and require a sitemap reference on it.
    async fn crawl_with_sitemap(
        &self,
        crawl: CrawlRef<'_>,
        operation: &str,
    ) -> WatercrawlResult<CrawlRequest> {
        let request = match crawl {
            CrawlRef::Id(id) => self.get_crawl_request(id).await?,
            CrawlRef::Request(request) => request.clone(),
        };
        if request.sitemap.is_none() {
            return Err(precondition("Crawl request has no sitemap"))
                .context(ErrorContext::new(operation).with_resource_id(&request.uuid));
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::ClientConfig;
    use crate::error::WatercrawlError;
    use crate::models::JobStatus;
    use bytes::Bytes;
    use serde_json::json;

    const BASE: &str = "https://api.test";

    fn client(mock: &MockHttpClient) -> WatercrawlClient<MockHttpClient> {
        WatercrawlClient::with_http_client(
            ClientConfig::new("key").with_base_url(BASE),
            mock.clone(),
        )
        .unwrap()
    }

    fn crawl_json(sitemap: Option<&str>) -> Value {
        json!({
            "uuid": "c1",
            "url": "https://watercrawl.dev",
            "status": "finished",
            "sitemap": sitemap
        })
    }

    #[tokio::test]
    async fn test_create_crawl_request_body() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "https://api.test/api/v1/core/crawl-requests/",
            MockResponse::json(201, &json!({"uuid": "c1", "url": "https://a", "status": "new"})),
        );

        let request = client(&mock)
            .create_crawl_request(
                "https://a",
                SpiderOptions::default().with_page_limit(3),
                PageOptions::default(),
                PluginOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(request.status, JobStatus::New);

        assert_eq!(
            mock.get_requests()[0].json_body(),
            Some(json!({
                "url": "https://a",
                "options": {
                    "spider_options": {"page_limit": 3},
                    "page_options": {},
                    "plugin_options": {}
                }
            }))
        );
    }

    #[tokio::test]
    async fn test_batch_crawl_posts_urls() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "https://api.test/api/v1/core/crawl-requests/batch/",
            MockResponse::json(
                201,
                &json!({"uuid": "b1", "urls": ["https://a", "https://b"], "status": "new"}),
            ),
        );

        let urls = vec!["https://a".to_string(), "https://b".to_string()];
        let request = client(&mock)
            .create_batch_crawl_request(
                &urls,
                SpiderOptions::default(),
                PageOptions::default(),
                PluginOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(request.urls.len(), 2);
        assert_eq!(
            mock.get_requests()[0].json_body().unwrap()["urls"],
            json!(["https://a", "https://b"])
        );
    }

    #[tokio::test]
    async fn test_results_query() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, &json!({"results": []})));

        client(&mock)
            .get_crawl_request_results("c1", Some(3), Some(2), true)
            .await
            .unwrap();

        assert_eq!(
            mock.get_requests()[0].url,
            "https://api.test/api/v1/core/crawl-requests/c1/results/?page=3&page_size=2&prefetched=true"
        );
    }

    #[tokio::test]
    async fn test_stop_crawl_request_uses_delete() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(crate::traits::Response::new(
            204,
            Bytes::new(),
        )));

        client(&mock).stop_crawl_request("c1").await.unwrap();

        let requests = mock.get_requests();
        let request = &requests[0];
        assert_eq!(request.method, crate::traits::Method::Delete);
        assert_eq!(request.url, "https://api.test/api/v1/core/crawl-requests/c1/");
    }

    #[tokio::test]
    async fn test_download_result_inline_skips_network() {
        let mock = MockHttpClient::new();
        let result = CrawlResult {
            uuid: "r1".to_string(),
            title: None,
            url: "https://a".to_string(),
            result: Some(ResultPayload::Inline(json!({"markdown": "hi"}))),
            created_at: None,
            attachments: vec![],
        };

        let value = client(&mock).download_result(&result).await.unwrap();
        assert_eq!(value, json!({"markdown": "hi"}));
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_download_sitemap_precondition_before_network() {
        let mock = MockHttpClient::new();
        let request: CrawlRequest = serde_json::from_value(crawl_json(None)).unwrap();

        let err = client(&mock)
            .download_sitemap_graph(&request)
            .await
            .unwrap_err();

        assert!(matches!(err.inner(), WatercrawlError::Precondition { .. }));
        assert_eq!(err.context().unwrap().operation, "download_sitemap_graph");
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_download_sitemap_by_id() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "https://api.test/api/v1/core/crawl-requests/c1/",
            MockResponse::json(200, &crawl_json(Some("https://storage.test/c1-sitemap.json"))),
        );
        mock.set_response(
            "https://storage.test/c1-sitemap.json",
            MockResponse::json(200, &json!([{"url": "https://watercrawl.dev/", "title": "Home"}])),
        );

        let nodes = client(&mock).download_sitemap("c1").await.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].title.as_deref(), Some("Home"));
    }

    #[tokio::test]
    async fn test_download_sitemap_markdown() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "https://api.test/api/v1/core/crawl-requests/c1/sitemap/markdown/",
            MockResponse::Success(crate::traits::Response::new(200, Bytes::from("# Sitemap"))),
        );
        let request: CrawlRequest =
            serde_json::from_value(crawl_json(Some("https://storage.test/s.json"))).unwrap();

        let markdown = client(&mock)
            .download_sitemap_markdown(&request)
            .await
            .unwrap();
        assert_eq!(markdown, "# Sitemap");
    }

    #[tokio::test]
    async fn test_scrape_url_async_returns_request() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "https://api.test/api/v1/core/crawl-requests/",
            MockResponse::json(201, &json!({"uuid": "c9", "url": "https://a", "status": "new"})),
        );

        let outcome = client(&mock)
            .scrape_url("https://a", PageOptions::default(), PluginOptions::new(), false, true)
            .await
            .unwrap();
        assert!(matches!(outcome, ScrapeOutcome::Pending(ref r) if r.uuid == "c9"));

        let body = mock.get_requests()[0].json_body().unwrap();
        assert_eq!(
            body["options"]["spider_options"],
            json!({"max_depth": 0, "page_limit": 1})
        );
    }
}
