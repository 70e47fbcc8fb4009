use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::options::PluginOptions;
use super::status::{JobResource, JobStatus};

/// Limits on how far a crawl follows links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpiderOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_paths: Vec<String>,
}

impl SpiderOptions {
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = Some(limit);
        self
    }
}

/// Extra output captured for each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Pdf,
    Screenshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
}

/// How each page is fetched and reduced to content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_tags: Vec<String>,
    /// Milliseconds to wait after load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_main_content: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_html: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_links: Option<bool>,
    /// Milliseconds before a page load is abandoned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_cookies_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlOptions {
    #[serde(default)]
    pub spider_options: SpiderOptions,
    #[serde(default)]
    pub page_options: PageOptions,
    #[serde(default)]
    pub plugin_options: PluginOptions,
}

/// A crawl job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub uuid: String,
    /// Seed URL. Batch crawls carry `urls` instead.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub options: CrawlOptions,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub number_of_documents: u64,
    #[serde(default)]
    pub duration: Option<String>,
    /// URL of the generated sitemap, once available
    #[serde(default)]
    pub sitemap: Option<String>,
}

impl JobResource for CrawlRequest {
    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn status(&self) -> &JobStatus {
        &self.status
    }
}

/// A result body: either a URL to fetch or the inlined content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    Url(String),
    Inline(Value),
}

impl ResultPayload {
    pub fn as_url(&self) -> Option<&str> {
        match self {
            ResultPayload::Url(url) => Some(url),
            ResultPayload::Inline(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultAttachment {
    pub uuid: String,
    /// URL of the attachment file
    pub attachment: String,
    pub attachment_type: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// One crawled page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub uuid: String,
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub result: Option<ResultPayload>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attachments: Vec<ResultAttachment>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateCrawlRequest<'a> {
    pub url: &'a str,
    pub options: &'a CrawlOptions,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateBatchCrawlRequest<'a> {
    pub urls: &'a [String],
    pub options: &'a CrawlOptions,
}
