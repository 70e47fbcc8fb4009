//! Mock HTTP client for testing.
//!
//! Serves scripted responses and scripted byte streams, records every
//! request, and counts how streams are opened, read and closed so tests can
//! check backpressure and connection cleanup.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::{HashMap, VecDeque};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Method, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: Method,
    /// Request URL, query string included
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Request body parsed as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response
    Success(Response),
    /// Fail the request
    Error(HttpError),
    /// Stream these chunks, then end cleanly
    Stream(Vec<Bytes>),
    /// Stream these chunks, then stay open without sending anything else
    OpenStream(Vec<Bytes>),
    /// Stream these chunks, then fail the read with the error
    BrokenStream(Vec<Bytes>, HttpError),
}

impl MockResponse {
    /// A buffered JSON response.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(value.to_string())))
    }

    /// A stream delivering `text` in a single chunk.
    pub fn event_stream(text: &str) -> Self {
        MockResponse::Stream(vec![Bytes::from(text.to_string())])
    }
}

/// Counters shared by every stream the mock hands out.
#[derive(Debug, Default)]
struct StreamCounters {
    opened: AtomicUsize,
    chunks_read: AtomicUsize,
    closed: AtomicUsize,
}

/// Snapshot of stream activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    /// Streams handed out by `get_stream`
    pub opened: usize,
    /// Chunks (or errors) pulled from those streams
    pub chunks_read: usize,
    /// Streams dropped by their consumer
    pub closed: usize,
}

/// Byte stream backed by a script; reports reads and drop to the mock.
struct MockByteStream {
    items: VecDeque<Result<Bytes, HttpError>>,
    stay_open: bool,
    counters: Arc<StreamCounters>,
}

impl Stream for MockByteStream {
    type Item = Result<Bytes, HttpError>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.items.pop_front() {
            Some(item) => {
                self.counters.chunks_read.fetch_add(1, Ordering::SeqCst);
                Poll::Ready(Some(item))
            }
            None if self.stay_open => Poll::Pending,
            None => Poll::Ready(None),
        }
    }
}

impl Drop for MockByteStream {
    fn drop(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use watercrawl::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://app.watercrawl.dev/api/v1/core/crawl-requests/abc/status/",
///     MockResponse::event_stream("data: {\"type\":\"state\",\"data\":{}}\n"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL or URL prefix
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    counters: Arc<StreamCounters>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
            counters: Arc::new(StreamCounters::default()),
        }
    }

    /// Set a response for a URL.
    ///
    /// The URL matches exactly, or as a prefix of the requested URL; the
    /// longest matching prefix wins.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Snapshot of stream activity so far.
    pub fn stream_stats(&self) -> StreamStats {
        StreamStats {
            opened: self.counters.opened.load(Ordering::SeqCst),
            chunks_read: self.counters.chunks_read.load(Ordering::SeqCst),
            closed: self.counters.closed.load(Ordering::SeqCst),
        }
    }

    /// Record a request.
    fn record_request(&self, method: Method, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    /// Get the response for a URL.
    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }

    fn open_stream(&self, items: Vec<Result<Bytes, HttpError>>, stay_open: bool) -> ByteStream {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Box::pin(MockByteStream {
            items: items.into(),
            stay_open,
            counters: Arc::clone(&self.counters),
        })
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request(method, url, headers, body.map(str::to_string));

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(_) => Err(HttpError::Other(
                "Stream response on non-stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }

    async fn get_stream(&self, url: &str, headers: &Headers) -> Result<ByteStream, HttpError> {
        self.record_request(Method::Get, url, headers, None);

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                Ok(self.open_stream(chunks.into_iter().map(Ok).collect(), false))
            }
            Some(MockResponse::OpenStream(chunks)) => {
                Ok(self.open_stream(chunks.into_iter().map(Ok).collect(), true))
            }
            Some(MockResponse::BrokenStream(chunks, err)) => {
                let mut items: Vec<Result<Bytes, HttpError>> =
                    chunks.into_iter().map(Ok).collect();
                items.push(Err(err));
                Ok(self.open_stream(items, false))
            }
            Some(MockResponse::Success(response)) if !response.is_success() => {
                Err(HttpError::ServerError {
                    status: response.status,
                    message: response.text_lossy(),
                })
            }
            Some(MockResponse::Success(response)) => {
                Ok(self.open_stream(vec![Ok(response.body)], false))
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
