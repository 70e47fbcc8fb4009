//! Streaming-related error types.
//!
//! Errors raised while consuming a job's status stream. Only
//! [`StreamError::ConnectionLost`] is ever handed to a stream consumer;
//! the frame-level variants are recorded and logged by the decoder and the
//! stream carries on.

use std::fmt;

/// Longest payload excerpt kept in a frame error.
const PAYLOAD_EXCERPT_LEN: usize = 120;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The connection failed after the stream was opened and before the
    /// server closed it or sent a termination marker.
    ConnectionLost {
        message: String,
    },

    /// A `data:` line whose payload is not valid JSON.
    MalformedFrame {
        payload: String,
        message: String,
    },

    /// Valid JSON that does not fit the event envelope for its `type`.
    InvalidEvent {
        event_type: String,
        message: String,
    },
}

impl StreamError {
    /// Build a `MalformedFrame` error, truncating long payloads.
    pub fn malformed_frame(payload: &str, message: impl Into<String>) -> Self {
        StreamError::MalformedFrame {
            payload: excerpt(payload),
            message: message.into(),
        }
    }

    /// Whether the stream ended abnormally. Frame errors are not fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StreamError::ConnectionLost { .. })
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::ConnectionLost { .. })
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::MalformedFrame { .. } => "E_STREAM_FRAME",
            StreamError::InvalidEvent { .. } => "E_STREAM_EVENT",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::MalformedFrame { payload, message } => {
                write!(f, "Malformed frame '{}': {}", payload, message)
            }
            StreamError::InvalidEvent { event_type, message } => {
                write!(f, "Invalid {} event: {}", event_type, message)
            }
        }
    }
}

impl std::error::Error for StreamError {}

fn excerpt(payload: &str) -> String {
    if payload.chars().count() <= PAYLOAD_EXCERPT_LEN {
        return payload.to_string();
    }
    let mut out: String = payload.chars().take(PAYLOAD_EXCERPT_LEN).collect();
    out.push_str("...");
    out
}
