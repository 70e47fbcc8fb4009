//! Authenticated JSON transport over an [`HttpClient`].
//!
//! Joins API paths onto the configured base URL, attaches the `X-API-KEY`
//! header, and maps failures onto [`WatercrawlError`]. Nothing is retried.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{NetworkError, WatercrawlError, WatercrawlResult};
use crate::sse::JsonEventStream;
use crate::traits::{Headers, HttpClient, HttpError, Method, Response};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Query parameters in the order they are sent.
pub type Query<'a> = &'a [(&'a str, String)];

/// Join `path` onto `base` with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Encode query parameters, `None` for an empty query.
pub fn encode_query(query: Query<'_>) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    Some(
        query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&"),
    )
}

/// Transport adapter bound to one base URL and one API key.
#[derive(Clone)]
pub struct Transport<C> {
    http: C,
    base_url: String,
    api_key: String,
}

impl<C: HttpClient> Transport<C> {
    pub fn new(http: C, config: &ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str, query: Query<'_>) -> String {
        let url = join_url(&self.base_url, path);
        match encode_query(query) {
            Some(qs) => format!("{}?{}", url, qs),
            None => url,
        }
    }

    fn headers(&self, with_body: bool) -> Headers {
        let mut headers = Headers::new();
        headers.insert(API_KEY_HEADER.to_string(), self.api_key.clone());
        headers.insert("Accept".to_string(), "application/json".to_string());
        if with_body {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        headers
    }

    /// Send a request and decode the JSON body.
    ///
    /// An empty body decodes to `Value::Null`; a non-JSON body (such as a
    /// markdown rendering) to `Value::String`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&Value>,
    ) -> WatercrawlResult<Value> {
        let url = self.url(path, query);
        let body = body.map(Value::to_string);
        let headers = self.headers(body.is_some());

        let response = self
            .http
            .request(method, &url, body.as_deref(), &headers)
            .await
            .map_err(|e| {
                tracing::warn!(method = %method, path = %path, "Request failed: {}", e);
                WatercrawlError::Network(NetworkError::from_http(e, &url))
            })?;

        check_status(method, path, &response)?;
        decode_body(&response)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> WatercrawlResult<T> {
        let value = self.request(Method::Get, path, query, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> WatercrawlResult<T> {
        let body = serde_json::to_value(body)?;
        let value = self.request(Method::Post, path, &[], Some(&body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, path: &str) -> WatercrawlResult<Value> {
        self.request(Method::Delete, path, &[], None).await
    }

    /// Open the event stream at `path`. One request per call.
    pub async fn open_stream(&self, path: &str, query: Query<'_>) -> WatercrawlResult<JsonEventStream> {
        let url = self.url(path, query);
        let mut headers = self.headers(false);
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        match self.http.get_stream(&url, &headers).await {
            Ok(body) => Ok(JsonEventStream::new(body)),
            Err(HttpError::ServerError { status, message }) => {
                tracing::warn!(method = "GET", path = %path, status, "Stream request rejected");
                Err(WatercrawlError::Transport {
                    status,
                    body: message,
                })
            }
            Err(e) => {
                tracing::warn!(method = "GET", path = %path, "Stream request failed: {}", e);
                Err(WatercrawlError::Network(NetworkError::from_http(e, &url)))
            }
        }
    }

    /// GET an absolute URL without the API key, for result and sitemap
    /// files served from storage.
    pub async fn fetch_absolute(&self, url: &str) -> WatercrawlResult<Value> {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let response = self
            .http
            .request(Method::Get, url, None, &headers)
            .await
            .map_err(|e| {
                tracing::warn!(method = "GET", url = %url, "Download failed: {}", e);
                WatercrawlError::Network(NetworkError::from_http(e, url))
            })?;

        check_status(Method::Get, url, &response)?;
        decode_body(&response)
    }
}

impl<C> std::fmt::Debug for Transport<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn check_status(method: Method, path: &str, response: &Response) -> WatercrawlResult<()> {
    if response.is_success() {
        return Ok(());
    }
    tracing::warn!(
        method = %method,
        path = %path,
        status = response.status,
        "Request returned error status"
    );
    Err(WatercrawlError::Transport {
        status: response.status,
        body: response.text_lossy(),
    })
}

fn decode_body(response: &Response) -> WatercrawlResult<Value> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    match response.json::<Value>() {
        Ok(value) => Ok(value),
        Err(e) if is_json_content(response) => Err(e.into()),
        Err(_) => Ok(Value::String(response.text_lossy())),
    }
}

fn is_json_content(response: &Response) -> bool {
    response
        .headers
        .iter()
        .any(|(name, value)| name.eq_ignore_ascii_case("content-type") && value.contains("json"))
}
