//! Unified error handling for the WaterCrawl client.
//!
//! - **Error Categories**: coarse classification for handling decisions
//! - **Domain-specific Errors**: network and stream errors
//! - **Unified Error Type**: `WatercrawlError` consolidates everything
//! - **Error Context**: operation name and job id attached by the client
//! - **Result Type Alias**: `WatercrawlResult<T>`
//!
//! # Example
//!
//! ```ignore
//! use watercrawl::error::WatercrawlError;
//!
//! match client.get_crawl_request("job-id").await {
//!     Ok(request) => println!("{:?}", request.status),
//!     Err(err) if err.status() == Some(404) => eprintln!("no such job"),
//!     Err(err) => {
//!         eprintln!("{} ({})", err, err.category());
//!         if err.is_retryable() {
//!             eprintln!("Hint: {}", err.recovery_hint());
//!         }
//!     }
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Source | Retryable |
//! |----------|--------|-----------|
//! | Network | connection, DNS, timeout, stream cut off | Yes |
//! | Auth | HTTP 401/403 | No |
//! | Server | HTTP 5xx | Yes |
//! | Client | undecodable response | No |
//! | User | HTTP 4xx, precondition, no result | No |
//! | Configuration | missing API key | No |

mod category;
mod context;
mod network;
mod result;
mod stream;
mod watercrawl_error;

pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use network::NetworkError;
pub use result::{ResultExt, WatercrawlResult};
pub use stream::StreamError;
pub use watercrawl_error::WatercrawlError;
