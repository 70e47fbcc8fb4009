//! Mock configurations for test fixtures.
//!
//! Re-exports the mock HTTP client from `watercrawl::adapters::mock` and
//! adds a builder for scripting it.

pub use watercrawl::adapters::mock::{MockHttpClient, MockResponse};
pub use watercrawl::traits::HttpError;

use bytes::Bytes;

/// Builder for a scripted [`MockHttpClient`].
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a JSON response.
    pub fn with_json_response(self, url: &str, status: u16, json: &serde_json::Value) -> Self {
        self.client.set_response(url, MockResponse::json(status, json));
        self
    }

    /// Configures a stream that ends after `body`.
    pub fn with_stream(self, url: &str, body: &str) -> Self {
        self.client.set_response(url, MockResponse::event_stream(body));
        self
    }

    /// Configures a stream delivering `chunks` one by one, then ending.
    pub fn with_chunked_stream(self, url: &str, chunks: Vec<Vec<u8>>) -> Self {
        self.client.set_response(
            url,
            MockResponse::Stream(chunks.into_iter().map(Bytes::from).collect()),
        );
        self
    }

    /// Configures a stream that stays open after `body`.
    pub fn with_open_stream(self, url: &str, body: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::OpenStream(vec![Bytes::from(body.to_string())]),
        );
        self
    }

    /// Configures a stream whose read fails after `body`.
    pub fn with_broken_stream(self, url: &str, body: &str, error: HttpError) -> Self {
        self.client.set_response(
            url,
            MockResponse::BrokenStream(vec![Bytes::from(body.to_string())], error),
        );
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
