//! Unified error type for the WaterCrawl client.
//!
//! `WatercrawlError` is what every public operation returns. Domain errors
//! (network, stream) keep their own enums; everything else is a variant here.

use std::fmt;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::stream::StreamError;
use crate::config::ConfigError;

/// Unified error type for the WaterCrawl client.
#[derive(Debug)]
pub enum WatercrawlError {
    /// The service answered with a non-2xx status.
    Transport { status: u16, body: String },

    /// Connection-level failure before a response was received.
    Network(NetworkError),

    /// Failure while consuming an event stream.
    Stream(StreamError),

    /// A 2xx response whose body did not decode into the expected type.
    Decode { message: String },

    /// A monitored job's stream ended without a result or terminal state.
    NoResult { resource_id: String },

    /// A locally checkable precondition failed; no request was sent.
    Precondition { message: String },

    /// Invalid client configuration.
    Config(ConfigError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<WatercrawlError>,
        context: ErrorContext,
    },
}

impl WatercrawlError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            WatercrawlError::Transport { status, .. } => match *status {
                401 | 403 => ErrorCategory::Auth,
                408 | 429 => ErrorCategory::Network,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::User,
            },
            WatercrawlError::Network(_) => ErrorCategory::Network,
            WatercrawlError::Stream(err) => {
                if err.is_fatal() {
                    ErrorCategory::Network
                } else {
                    ErrorCategory::Client
                }
            }
            WatercrawlError::Decode { .. } => ErrorCategory::Client,
            WatercrawlError::NoResult { .. } => ErrorCategory::User,
            WatercrawlError::Precondition { .. } => ErrorCategory::User,
            WatercrawlError::Config(_) => ErrorCategory::Configuration,
            WatercrawlError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            WatercrawlError::Network(err) => err.is_retryable(),
            WatercrawlError::Stream(err) => err.is_retryable(),
            WatercrawlError::WithContext { error, .. } => error.is_retryable(),
            other => other.category().is_retryable(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            WatercrawlError::Transport { .. } => "E_HTTP_STATUS",
            WatercrawlError::Network(err) => err.error_code(),
            WatercrawlError::Stream(err) => err.error_code(),
            WatercrawlError::Decode { .. } => "E_DECODE",
            WatercrawlError::NoResult { .. } => "E_NO_RESULT",
            WatercrawlError::Precondition { .. } => "E_PRECONDITION",
            WatercrawlError::Config(_) => "E_CONFIG",
            WatercrawlError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// HTTP status of a `Transport` error, looking through context.
    pub fn status(&self) -> Option<u16> {
        match self.inner() {
            WatercrawlError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error reports an event stream that was cut off
    /// rather than closed by the server.
    pub fn is_stream_interrupted(&self) -> bool {
        matches!(
            self.inner(),
            WatercrawlError::Stream(StreamError::ConnectionLost { .. })
        )
    }

    /// Attach context to this error.
    ///
    /// Context is not stacked: an error that already carries context keeps
    /// the innermost (most specific) one.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        match self {
            WatercrawlError::WithContext { .. } => self,
            other => WatercrawlError::WithContext {
                error: Box::new(other),
                context: ctx,
            },
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            WatercrawlError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &WatercrawlError {
        match self {
            WatercrawlError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for WatercrawlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatercrawlError::Transport { status, body } => {
                if body.is_empty() {
                    write!(f, "HTTP {} from WaterCrawl API", status)
                } else {
                    write!(f, "HTTP {} from WaterCrawl API: {}", status, body)
                }
            }
            WatercrawlError::Network(err) => write!(f, "{}", err),
            WatercrawlError::Stream(err) => write!(f, "{}", err),
            WatercrawlError::Decode { message } => {
                write!(f, "Failed to decode response: {}", message)
            }
            WatercrawlError::NoResult { resource_id } => {
                write!(f, "No result received for job {}", resource_id)
            }
            WatercrawlError::Precondition { message } => write!(f, "{}", message),
            WatercrawlError::Config(err) => write!(f, "{}", err),
            WatercrawlError::WithContext { error, context } => {
                write!(f, "{} {}", context, error)
            }
        }
    }
}

impl std::error::Error for WatercrawlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WatercrawlError::Network(err) => Some(err),
            WatercrawlError::Stream(err) => Some(err),
            WatercrawlError::Config(err) => Some(err),
            WatercrawlError::WithContext { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<NetworkError> for WatercrawlError {
    fn from(err: NetworkError) -> Self {
        WatercrawlError::Network(err)
    }
}

impl From<StreamError> for WatercrawlError {
    fn from(err: StreamError) -> Self {
        WatercrawlError::Stream(err)
    }
}

impl From<ConfigError> for WatercrawlError {
    fn from(err: ConfigError) -> Self {
        WatercrawlError::Config(err)
    }
}

impl From<serde_json::Error> for WatercrawlError {
    fn from(err: serde_json::Error) -> Self {
        WatercrawlError::Decode {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_transport_categories() {
        let cases = [
            (401, ErrorCategory::Auth),
            (403, ErrorCategory::Auth),
            (404, ErrorCategory::User),
            (429, ErrorCategory::Network),
            (502, ErrorCategory::Server),
        ];
        for (status, expected) in cases {
            let err = WatercrawlError::Transport {
                status,
                body: String::new(),
            };
            assert_eq!(err.category(), expected, "status {}", status);
        }
    }

    #[test]
    fn test_stream_categories() {
        let lost: WatercrawlError = StreamError::ConnectionLost {
            message: "eof".to_string(),
        }
        .into();
        assert_eq!(lost.category(), ErrorCategory::Network);
        assert!(lost.is_retryable());
        assert!(lost.is_stream_interrupted());

        let invalid: WatercrawlError = StreamError::InvalidEvent {
            event_type: "state".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(invalid.category(), ErrorCategory::Client);
        assert!(!invalid.is_stream_interrupted());
    }

    #[test]
    fn test_context_is_displayed_and_preserved() {
        let err = WatercrawlError::Transport {
            status: 404,
            body: r#"{"detail":"Not found."}"#.to_string(),
        }
        .with_context(ErrorContext::new("get_crawl_request").with_resource_id("job-9"));

        let display = err.to_string();
        assert!(display.contains("get_crawl_request"));
        assert!(display.contains("job-9"));
        assert!(display.contains("404"));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.context().unwrap().operation, "get_crawl_request");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_context_not_stacked() {
        let err = WatercrawlError::NoResult {
            resource_id: "job-1".to_string(),
        }
        .with_context(ErrorContext::new("inner"))
        .with_context(ErrorContext::new("outer"));

        assert_eq!(err.context().unwrap().operation, "inner");
        assert!(matches!(err.inner(), WatercrawlError::NoResult { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: WatercrawlError = json_err.into();

        assert!(matches!(err, WatercrawlError::Decode { .. }));
        assert_eq!(err.category(), ErrorCategory::Client);
    }

    #[test]
    fn test_error_codes_non_empty() {
        let errors: Vec<WatercrawlError> = vec![
            WatercrawlError::Precondition {
                message: "no sitemap".to_string(),
            },
            WatercrawlError::NoResult {
                resource_id: "x".to_string(),
            },
            NetworkError::Cancelled.into(),
        ];
        for err in errors {
            assert!(!err.error_code().is_empty());
        }
    }
}
