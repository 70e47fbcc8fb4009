//! Prelude module for convenient imports.
//!
//! ```ignore
//! use watercrawl::prelude::*;
//! ```
//!
//! This will import:
//! - The client and its configuration
//! - Resource and event models
//! - Monitors and the unified error type

pub use crate::client::{CrawlRef, ScrapeOutcome, WatercrawlClient};
pub use crate::config::ClientConfig;
pub use crate::error::{WatercrawlError, WatercrawlResult};
pub use crate::models::{
    CrawlEvent, CrawlRequest, CrawlResult, JobResource, JobStatus, MonitorEvent, Page,
    PageOptions, PluginOptions, SearchEvent, SearchOptions, SearchRequest, SitemapEvent,
    SitemapOptions, SitemapOutputFormat, SitemapRequest, SpiderOptions,
};
pub use crate::monitor::{Monitor, Outcome};
