// src/lib.rs
// =============================================================================
// site-crawler: a breadth-first crawler confined to the seed's host.
//
// Modules:
// - crawl: the level-by-level traversal and its report
// - extract: link rules and same-host link resolution
// - fetch: the Fetcher trait and the HTTP implementation
// - config: crawler settings (file + defaults)
// - error: library error types
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;

pub use config::CrawlerConfig;
pub use crawl::{crawl, CrawlReport, Crawler, FailedFetch};
pub use error::{CrawlError, FetchError};
pub use extract::{extract_links, CssRule, LinkRule};
pub use fetch::{FetchedResponse, Fetcher, HttpFetcher};
