//! Common test utilities for integration tests.
//!
//! Fixtures for job snapshots and status streams, plus client builders over
//! the mock HTTP client or a wiremock server.
//!
//! # Example
//!
//! ```ignore
//! let mock = MockHttpConfig::new()
//!     .with_stream(&status_url("crawl-requests", "c1"), &stream_of(&[state_event("c1", "running")]))
//!     .build();
//! let client = mock_client(&mock);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use serde_json::{json, Value};
use watercrawl::{ClientConfig, WatercrawlClient};

/// Base URL used with the mock HTTP client.
pub const TEST_BASE_URL: &str = "https://api.watercrawl.test";

/// API key used by every test client.
pub const TEST_API_KEY: &str = "test-api-key-12345";

/// Client over the mock HTTP client.
pub fn mock_client(mock: &MockHttpClient) -> WatercrawlClient<MockHttpClient> {
    WatercrawlClient::with_http_client(
        ClientConfig::new(TEST_API_KEY).with_base_url(TEST_BASE_URL),
        mock.clone(),
    )
    .expect("valid test config")
}

/// Reqwest-backed client pointed at a wiremock server.
pub fn server_client(uri: &str) -> WatercrawlClient {
    WatercrawlClient::new(ClientConfig::new(TEST_API_KEY).with_base_url(uri))
        .expect("valid test config")
}

/// Absolute URL of a status stream on the mock base URL.
pub fn status_url(kind: &str, id: &str) -> String {
    format!("{}/api/v1/core/{}/{}/status/", TEST_BASE_URL, kind, id)
}

/// Crawl request snapshot.
pub fn crawl_json(id: &str, status: &str) -> Value {
    json!({
        "uuid": id,
        "url": "https://watercrawl.dev",
        "status": status,
        "options": {
            "spider_options": {"max_depth": 1, "page_limit": 10},
            "page_options": {"only_main_content": true},
            "plugin_options": {}
        },
        "created_at": "2025-03-01T10:00:00Z",
        "updated_at": "2025-03-01T10:00:05Z",
        "number_of_documents": 0,
        "duration": null
    })
}

/// `state` envelope for a crawl.
pub fn state_event(id: &str, status: &str) -> Value {
    json!({"type": "state", "data": crawl_json(id, status)})
}

/// `result` envelope carrying `payload` inline.
pub fn result_event(result_id: &str, payload: Value) -> Value {
    json!({
        "type": "result",
        "data": {
            "uuid": result_id,
            "title": "WaterCrawl",
            "url": "https://watercrawl.dev/",
            "result": payload,
            "created_at": "2025-03-01T10:00:03Z",
            "attachments": []
        }
    })
}

/// Wire form of a sequence of events.
pub fn stream_of(events: &[Value]) -> String {
    events
        .iter()
        .map(|event| format!("data: {}\n\n", event))
        .collect()
}
