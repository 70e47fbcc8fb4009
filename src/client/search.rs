use super::{job_path, WatercrawlClient, SEARCH_PATH};
use crate::error::{ErrorContext, ResultExt, WatercrawlResult};
use crate::models::search::CreateSearchRequest;
use crate::models::{Page, SearchOptions, SearchRequest, SearchResult};
use crate::monitor::Monitor;
use crate::traits::HttpClient;

/// Result limit used when the caller does not pass one.
pub const DEFAULT_RESULT_LIMIT: u32 = 5;

impl<C: HttpClient> WatercrawlClient<C> {
    pub async fn list_search_requests(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> WatercrawlResult<Page<SearchRequest>> {
        self.transport
            .get(SEARCH_PATH, &self.page_query(page, page_size))
            .await
            .context(ErrorContext::new("list_search_requests"))
    }

    /// Fetch one search; with `prefetched` set, results are inlined.
    pub async fn get_search_request(
        &self,
        id: &str,
        prefetched: bool,
    ) -> WatercrawlResult<SearchRequest> {
        self.transport
            .get(
                &job_path(SEARCH_PATH, id),
                &[("prefetched", prefetched.to_string())],
            )
            .await
            .context(ErrorContext::new("get_search_request").with_resource_id(id))
    }

    pub async fn create_search_request(
        &self,
        query: &str,
        options: &SearchOptions,
        result_limit: Option<u32>,
    ) -> WatercrawlResult<SearchRequest> {
        self.transport
            .post(
                SEARCH_PATH,
                &CreateSearchRequest {
                    query,
                    search_options: options,
                    result_limit: result_limit.unwrap_or(DEFAULT_RESULT_LIMIT),
                },
            )
            .await
            .context(ErrorContext::new("create_search_request"))
    }

    /// Run a search and wait for it to finish.
    ///
    /// Returns the final snapshot; its `result` holds the hits when
    /// `prefetched` is set, or a URL to them otherwise.
    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
        result_limit: Option<u32>,
        prefetched: bool,
    ) -> WatercrawlResult<SearchRequest> {
        let request = self
            .create_search_request(query, options, result_limit)
            .await?;
        self.monitor_search_request(&request.uuid, prefetched)
            .await?
            .wait_for_terminal()
            .await
            .context(ErrorContext::new("search").with_resource_id(&request.uuid))
    }

    pub async fn monitor_search_request(
        &self,
        id: &str,
        prefetched: bool,
    ) -> WatercrawlResult<Monitor<SearchRequest, SearchResult>> {
        self.open_monitor("monitor_search_request", SEARCH_PATH, id, prefetched)
            .await
    }

    pub async fn stop_search_request(&self, id: &str) -> WatercrawlResult<()> {
        self.transport
            .delete(&job_path(SEARCH_PATH, id))
            .await
            .map(|_| ())
            .context(ErrorContext::new("stop_search_request").with_resource_id(id))
    }
}
