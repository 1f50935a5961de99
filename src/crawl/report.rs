// src/crawl/report.rs
// =============================================================================
// What a finished crawl hands back to its caller.
// =============================================================================

use serde::Serialize;

use crate::error::FetchError;
use crate::fetch::FetchedResponse;

/// A URL the crawler tried to fetch but could not.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFetch {
    pub url: String,
    pub depth: usize,
    pub error: FetchError,
}

/// Everything collected during one crawl.
///
/// `pages` is ordered level by level; inside a level it follows the order
/// in which fetches completed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    pub pages: Vec<FetchedResponse>,
    pub failures: Vec<FailedFetch>,
    /// Frontier left over when the depth ceiling stopped the crawl
    pub unvisited: Vec<String>,
    /// Number of levels that were actually fetched
    pub levels: usize,
}

impl CrawlReport {
    /// True when the depth ceiling cut the crawl short
    pub fn truncated(&self) -> bool {
        !self.unvisited.is_empty()
    }

    /// Every URL that was requested, successful pages first
    pub fn fetched_urls(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .map(|p| p.requested_url.as_str())
            .chain(self.failures.iter().map(|f| f.url.as_str()))
    }
}
