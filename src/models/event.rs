//! Event envelope read from job status streams.
//!
//! Every frame is `{"type": ..., "data": ...}`. `state` carries a full job
//! snapshot, `result` a single result item, and `feed` a progress message.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::crawl::{CrawlRequest, CrawlResult};
use super::search::{SearchRequest, SearchResult};
use super::sitemap::SitemapRequest;
use crate::error::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSeverity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    #[serde(other)]
    Unknown,
}

/// Human-readable progress message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedMessage {
    pub message: String,
    #[serde(default, alias = "level", alias = "type")]
    pub severity: FeedSeverity,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

/// A typed event for a job whose snapshots are `S` and results are `R`.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent<S, R> {
    /// New job snapshot
    State(S),
    /// One new result item
    Result(R),
    /// Progress message
    Feed(FeedMessage),
    /// An event type this client does not know yet
    Other { kind: String, data: Value },
}

pub type CrawlEvent = MonitorEvent<CrawlRequest, CrawlResult>;
pub type SearchEvent = MonitorEvent<SearchRequest, SearchResult>;
pub type SitemapEvent = MonitorEvent<SitemapRequest, Value>;

impl<S: DeserializeOwned, R: DeserializeOwned> MonitorEvent<S, R> {
    /// Map a decoded frame to an event by its `type` discriminator.
    pub fn from_value(value: Value) -> Result<Self, StreamError> {
        let envelope: Envelope =
            serde_json::from_value(value).map_err(|e| StreamError::InvalidEvent {
                event_type: "unknown".to_string(),
                message: e.to_string(),
            })?;

        let invalid = |e: serde_json::Error| StreamError::InvalidEvent {
            event_type: envelope.kind.clone(),
            message: e.to_string(),
        };

        match envelope.kind.as_str() {
            "state" => serde_json::from_value(envelope.data.clone())
                .map(MonitorEvent::State)
                .map_err(invalid),
            "result" => serde_json::from_value(envelope.data.clone())
                .map(MonitorEvent::Result)
                .map_err(invalid),
            "feed" => serde_json::from_value(envelope.data.clone())
                .map(MonitorEvent::Feed)
                .map_err(invalid),
            _ => Ok(MonitorEvent::Other {
                kind: envelope.kind.clone(),
                data: envelope.data.clone(),
            }),
        }
    }
}

impl<S, R> MonitorEvent<S, R> {
    /// Wire name of the event type.
    pub fn kind(&self) -> &str {
        match self {
            MonitorEvent::State(_) => "state",
            MonitorEvent::Result(_) => "result",
            MonitorEvent::Feed(_) => "feed",
            MonitorEvent::Other { kind, .. } => kind,
        }
    }

    pub fn as_state(&self) -> Option<&S> {
        match self {
            MonitorEvent::State(state) => Some(state),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<R> {
        match self {
            MonitorEvent::Result(result) => Some(result),
            _ => None,
        }
    }
}
