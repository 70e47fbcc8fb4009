//! Result type alias for WaterCrawl operations.

use super::context::ErrorContext;
use super::watercrawl_error::WatercrawlError;

/// Type alias for Results using WatercrawlError.
pub type WatercrawlResult<T> = Result<T, WatercrawlError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use watercrawl::error::{ErrorContext, ResultExt};
    ///
    /// let request = transport
    ///     .get_json(&path, &[])
    ///     .await
    ///     .context(ErrorContext::new("get_crawl_request").with_resource_id(id))?;
    /// ```
    fn context(self, ctx: ErrorContext) -> WatercrawlResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> WatercrawlResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<WatercrawlError>,
{
    fn context(self, ctx: ErrorContext) -> WatercrawlResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> WatercrawlResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
