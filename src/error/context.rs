//! Error context for enriched error information.
//!
//! Every client operation attaches an [`ErrorContext`] naming itself and the
//! job it touched, so a failure can be diagnosed from its message alone.

use chrono::{DateTime, Utc};

/// Context information attached to errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Name of the client operation that failed (e.g. `get_crawl_request`).
    pub operation: String,

    /// Job identifier, when the operation targeted a single job.
    pub resource_id: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Set the job identifier for this context.
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref resource_id) = self.resource_id {
            parts.push(format!("resource_id={}", resource_id));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref resource_id) = self.resource_id {
            write!(f, " id={}", resource_id)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_new() {
        let ctx = ErrorContext::new("get_crawl_request");

        assert_eq!(ctx.operation, "get_crawl_request");
        assert!(ctx.resource_id.is_none());
    }

    #[test]
    fn test_context_display() {
        let ctx = ErrorContext::new("stop_search_request").with_resource_id("abc-123");

        let display = format!("{}", ctx);
        assert_eq!(display, "[stop_search_request] id=abc-123");
    }

    #[test]
    fn test_context_display_minimal() {
        let ctx = ErrorContext::new("list_crawl_requests");

        let display = format!("{}", ctx);
        assert_eq!(display, "[list_crawl_requests]");
    }

    #[test]
    fn test_context_to_log_string() {
        let ctx = ErrorContext::new("monitor_crawl_request").with_resource_id("job-1");

        let log_str = ctx.to_log_string();
        assert!(log_str.contains("operation=monitor_crawl_request"));
        assert!(log_str.contains("resource_id=job-1"));
        assert!(log_str.contains("timestamp="));
    }

    #[test]
    fn test_context_timestamp_is_recent() {
        let before = Utc::now();
        let ctx = ErrorContext::new("timed_op");
        let after = Utc::now();

        assert!(ctx.timestamp >= before);
        assert!(ctx.timestamp <= after);
    }
}
