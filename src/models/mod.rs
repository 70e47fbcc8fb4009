//! Resource types exchanged with the WaterCrawl API.

pub mod crawl;
pub mod event;
mod options;
mod pagination;
pub mod search;
pub mod sitemap;
mod status;

pub use crawl::{
    Action, ActionType, CrawlOptions, CrawlRequest, CrawlResult, PageOptions, ResultAttachment,
    ResultPayload, SpiderOptions,
};
pub use event::{CrawlEvent, FeedMessage, FeedSeverity, MonitorEvent, SearchEvent, SitemapEvent};
pub use options::{OptionValue, PluginOptions};
pub use pagination::Page;
pub use search::{
    Depth, SearchOptions, SearchRequest, SearchResult, SearchResultPayload, SearchType, TimeRange,
};
pub use sitemap::{SitemapNode, SitemapOptions, SitemapOutputFormat, SitemapRequest};
pub use status::{JobResource, JobStatus};
