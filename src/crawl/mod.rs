// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-host restriction (links to other hosts are never followed)
// - Every URL is fetched at most once
// - Configurable depth ceiling; leftovers are reported, not dropped silently
// =============================================================================

mod controller;
mod report;

pub use controller::{crawl, Crawler};
pub use report::{CrawlReport, FailedFetch};
