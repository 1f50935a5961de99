// src/crawl/controller.rs
// =============================================================================
// This module implements the crawl itself, one breadth-first level at a time.
//
// How it works:
// 1. Start with the seed URL as the only entry of the frontier
// 2. Fetch every URL of the frontier concurrently and wait for all of them
// 3. Extract same-host links from every page that came back
// 4. The next frontier is whatever was discovered and never seen before
// 5. Repeat until the frontier is empty or the depth ceiling is passed
//
// The seen set and frontier are plain locals of `run`: they are only
// touched between levels, while no fetch is in flight.
// =============================================================================

use std::collections::{BTreeSet, HashSet};

use futures::stream::{self, StreamExt};
use url::Url;

use super::report::{CrawlReport, FailedFetch};
use crate::config::default_max_depth;
use crate::error::{CrawlError, FetchError};
use crate::extract::{extract_links, LinkRule};
use crate::fetch::{FetchedResponse, Fetcher};

/// Breadth-first, same-host crawler.
///
/// Example:
///   let rule = CssRule::hrefs("a[href]")?;
///   let report = Crawler::new(&fetcher, &rule).max_depth(2).run(seed).await?;
pub struct Crawler<'a> {
    fetcher: &'a dyn Fetcher,
    rule: &'a dyn LinkRule,
    max_depth: usize,
}

impl<'a> Crawler<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, rule: &'a dyn LinkRule) -> Self {
        Self {
            fetcher,
            rule,
            max_depth: default_max_depth(),
        }
    }

    /// Depth 0 is the seed itself, so at most `max_depth + 1` levels run
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub async fn run(&self, seed: &str) -> Result<CrawlReport, CrawlError> {
        let seed = parse_seed(seed)?;

        let mut seen = HashSet::from([seed.clone()]);
        let mut frontier = vec![seed];
        let mut depth = 0;
        let mut report = CrawlReport::default();

        while !frontier.is_empty() {
            // Protects against endless crawls on sites that generate links
            if depth > self.max_depth {
                log::warn!(
                    "max depth {} reached with {} urls left in the crawl queue",
                    self.max_depth,
                    frontier.len()
                );
                report.unvisited = frontier;
                break;
            }

            log::info!("scraping: {} urls at depth {}", frontier.len(), depth);

            let mut discovered = BTreeSet::new();
            for (url, outcome) in self.fetch_level(&frontier).await {
                match outcome {
                    Ok(page) => {
                        discovered.extend(extract_links(&page, self.rule));
                        report.pages.push(page);
                    }
                    Err(error) => {
                        log::warn!("failed to fetch {url}: {error}");
                        report.failures.push(FailedFetch { url, depth, error });
                    }
                }
            }
            report.levels += 1;

            // discovered - seen, and seen |= discovered, in one pass
            frontier = discovered
                .into_iter()
                .filter(|url| seen.insert(url.clone()))
                .collect();
            depth += 1;
        }

        log::info!(
            "found {} responses ({} failed) in {} levels",
            report.pages.len(),
            report.failures.len(),
            report.levels
        );
        Ok(report)
    }

    // Fetches a whole level and returns once every request has finished.
    // The fetcher is expected to throttle; we ask for everything at once.
    async fn fetch_level(
        &self,
        frontier: &[String],
    ) -> Vec<(String, Result<FetchedResponse, FetchError>)> {
        let fetcher = self.fetcher;

        stream::iter(frontier.iter().cloned())
            .map(|url| async move {
                let outcome = fetcher.fetch(&url).await;
                (url, outcome)
            })
            .buffer_unordered(frontier.len().max(1))
            .collect()
            .await
    }
}

/// Crawls everything reachable from `seed` on the seed's host.
pub async fn crawl(
    seed: &str,
    rule: &dyn LinkRule,
    fetcher: &dyn Fetcher,
    max_depth: usize,
) -> Result<CrawlReport, CrawlError> {
    Crawler::new(fetcher, rule).max_depth(max_depth).run(seed).await
}

// The seed gets the same identity treatment as discovered links:
// absolute, with a host, fragment removed.
fn parse_seed(seed: &str) -> Result<String, CrawlError> {
    let invalid = |reason: String| CrawlError::InvalidSeed {
        url: seed.to_string(),
        reason,
    };

    let mut url = Url::parse(seed).map_err(|e| invalid(e.to_string()))?;
    if url.host_str().is_none() {
        return Err(invalid("URL has no host".to_string()));
    }
    url.set_fragment(None);

    Ok(url.to_string())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why levels instead of a VecDeque of (url, depth)?
//    - A level is fetched as one batch, so its requests overlap
//    - The seen set only changes between batches, never during one
//    - Depth is simply the number of batches done so far
//
// 2. Why is the seed put into the seen set up front?
//    - Pages often link back to the start page
//    - Without it the seed would be fetched a second time at depth 2
//
// 3. What does buffer_unordered(frontier.len()) do?
//    - Polls every fetch of the level at the same time
//    - Yields results as they finish, hence "unordered"
//    - collect() only returns when all of them are done
// -----------------------------------------------------------------------------
