//! Crawler module for page fetching and traversal
//!
//! This module contains the crawl machinery:
//! - HTTP fetching with retry on configured status codes
//! - Listing-page link discovery and pagination
//! - Frontier scheduling with per-host politeness
//! - Overall crawl coordination and cancellation

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use parser::{discover_links, ListingPageLinks};
pub use scheduler::{NextFetch, PageKind, QueuedFetch, Scheduler};

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl operation
///
/// Seeds the configured start URL, follows listing pages to detail pages
/// and onward through pagination, and streams normalized records to the
/// configured sink until no work remains.
pub async fn crawl(config: Config) -> Result<()> {
    run_crawl(config).await
}
