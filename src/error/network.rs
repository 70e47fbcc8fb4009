//! Network-related error types.
//!
//! Connection-level failures raised before a response status is known:
//! refused connections, DNS, TLS, timeouts and malformed URLs. Non-2xx
//! responses are not network errors; they surface as
//! [`WatercrawlError::Transport`](super::WatercrawlError::Transport).

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed {
        url: String,
        message: String,
    },

    /// DNS resolution failed.
    DnsResolutionFailed {
        host: String,
    },

    /// Request timed out.
    Timeout {
        url: String,
        message: String,
    },

    /// TLS/SSL error.
    TlsError {
        message: String,
    },

    /// The joined request URL could not be parsed.
    InvalidUrl {
        url: String,
    },

    /// Request was cancelled.
    Cancelled,

    /// Generic network error.
    Other {
        message: String,
    },
}

impl NetworkError {
    /// Classify an [`HttpError`] raised while sending a request to `url`.
    ///
    /// `HttpError::ServerError` is expected to be handled by the caller;
    /// it is folded into `Other` here.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) | HttpError::Io(message) => {
                let lower = message.to_lowercase();
                if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
                    NetworkError::TlsError { message }
                } else if lower.contains("dns") || lower.contains("resolve") {
                    NetworkError::DnsResolutionFailed {
                        host: extract_host_from_url(url),
                    }
                } else {
                    NetworkError::ConnectionFailed {
                        url: url.to_string(),
                        message,
                    }
                }
            }
            HttpError::Timeout(message) => NetworkError::Timeout {
                url: url.to_string(),
                message,
            },
            HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
                url: url.to_string(),
            },
            HttpError::Cancelled => NetworkError::Cancelled,
            HttpError::ServerError { status, message } => NetworkError::Other {
                message: format!("HTTP {}: {}", status, message),
            },
            HttpError::Other(message) => NetworkError::Other { message },
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::DnsResolutionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::TlsError { .. } => false, // Usually config issue
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::DnsResolutionFailed { .. } => "E_NET_DNS",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::TlsError { .. } => "E_NET_TLS",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::DnsResolutionFailed { host } => {
                write!(f, "DNS resolution failed for '{}'", host)
            }
            NetworkError::Timeout { url, message } => {
                write!(f, "Request to '{}' timed out: {}", url, message)
            }
            NetworkError::TlsError { message } => {
                write!(f, "TLS error: {}", message)
            }
            NetworkError::InvalidUrl { url } => {
                write!(f, "Invalid URL: {}", url)
            }
            NetworkError::Cancelled => {
                write!(f, "Request cancelled")
            }
            NetworkError::Other { message } => {
                write!(f, "Network error: {}", message)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

/// Host of `url`, or the whole string when it does not parse.
fn extract_host_from_url(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_string())
}
