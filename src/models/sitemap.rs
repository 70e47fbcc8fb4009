use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::crawl::ResultPayload;
use super::status::{JobResource, JobStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitemapOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_subdomains: Option<bool>,
    /// Skip the site's own `sitemap.xml` and discover links by crawling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_sitemap_xml: Option<bool>,
    /// Only keep URLs matching this search term
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub include_paths: Vec<String>,
    #[serde(default)]
    pub exclude_paths: Vec<String>,
}

/// A sitemap generation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapRequest {
    pub uuid: String,
    pub url: String,
    pub status: JobStatus,
    #[serde(default)]
    pub options: SitemapOptions,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub result: Option<ResultPayload>,
}

impl JobResource for SitemapRequest {
    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn status(&self) -> &JobStatus {
        &self.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapNode {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Rendering of a finished sitemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SitemapOutputFormat {
    #[default]
    Json,
    Graph,
    Markdown,
}

impl SitemapOutputFormat {
    /// Path segment under the sitemap request.
    pub fn path_segment(&self) -> &'static str {
        match self {
            SitemapOutputFormat::Json => "json",
            SitemapOutputFormat::Graph => "graph",
            SitemapOutputFormat::Markdown => "markdown",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateSitemapRequest<'a> {
    pub url: &'a str,
    pub options: &'a SitemapOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sitemap_request_from_server() {
        let request: SitemapRequest = serde_json::from_value(json!({
            "uuid": "m1",
            "url": "https://watercrawl.dev",
            "status": "new",
            "options": {
                "include_subdomains": true,
                "ignore_sitemap_xml": false,
                "search": null,
                "include_paths": [],
                "exclude_paths": []
            },
            "result": null
        }))
        .unwrap();

        assert_eq!(request.status, JobStatus::New);
        assert_eq!(request.options.include_subdomains, Some(true));
        assert!(request.result.is_none());
    }

    #[test]
    fn test_options_always_send_paths() {
        let options = SitemapOptions::default();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"search": null, "include_paths": [], "exclude_paths": []})
        );
    }

    #[test]
    fn test_format_segments() {
        assert_eq!(SitemapOutputFormat::default().path_segment(), "json");
        assert_eq!(SitemapOutputFormat::Graph.path_segment(), "graph");
        assert_eq!(SitemapOutputFormat::Markdown.path_segment(), "markdown");
    }
}
