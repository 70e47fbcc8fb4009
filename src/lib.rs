//! WaterCrawl - a typed client for the WaterCrawl crawl, search and sitemap API
//!
//! Jobs run on the server; the client creates them, follows their status
//! streams through [`monitor::Monitor`], and fetches their results.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod monitor;
pub mod prelude;
pub mod sse;
pub mod traits;
pub mod transport;

pub use client::WatercrawlClient;
pub use config::ClientConfig;
pub use error::{WatercrawlError, WatercrawlResult};
