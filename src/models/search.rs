use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{JobResource, JobStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Any,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Web,
}

/// How much work the service puts into each search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Basic,
    Advanced,
    Ultimate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Language code, e.g. `en`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Country code, e.g. `us`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_type: Option<SearchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<Depth>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub depth: Option<Depth>,
}

/// Results of a search: inlined when prefetched, otherwise a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResultPayload {
    Results(Vec<SearchResult>),
    Url(String),
}

/// A search job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub uuid: String,
    pub query: String,
    #[serde(default)]
    pub search_options: SearchOptions,
    #[serde(default)]
    pub result_limit: u32,
    pub status: JobStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub result: Option<SearchResultPayload>,
}

impl SearchRequest {
    /// Inlined results, if the request was fetched with results prefetched.
    pub fn results(&self) -> Option<&[SearchResult]> {
        match &self.result {
            Some(SearchResultPayload::Results(results)) => Some(results),
            _ => None,
        }
    }
}

impl JobResource for SearchRequest {
    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn status(&self) -> &JobStatus {
        &self.status
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateSearchRequest<'a> {
    pub query: &'a str,
    pub search_options: &'a SearchOptions,
    pub result_limit: u32,
}
