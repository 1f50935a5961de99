// src/extract/links.rs
// =============================================================================
// Resolves the raw links a rule found on a page into crawlable URLs.
//
// For every raw link:
// 1. Cut off the fragment (everything from the first '#')
// 2. Join it against the page's final URL
// 3. Keep it only if it lives on the same host as the page
//
// Links that fail to resolve or point to another host are dropped and
// logged; they never make the whole page fail.
// =============================================================================

use std::collections::BTreeSet;

use url::Url;

use super::rule::LinkRule;
use crate::fetch::FetchedResponse;

/// Returns the same-host URLs linked from `response`, deduplicated.
///
/// A BTreeSet keeps the output ordered, which makes frontiers and logs
/// reproducible from run to run.
pub fn extract_links(response: &FetchedResponse, rule: &dyn LinkRule) -> BTreeSet<String> {
    let base = &response.url;
    let mut found = BTreeSet::new();

    for raw in rule.find_links(&response.body) {
        let Some(url) = resolve_link(base, &raw) else {
            continue;
        };

        if url.host_str() != response.host() {
            log::debug!(
                "skipping url of a different hostname: {} ({})",
                url.host_str().unwrap_or("<none>"),
                url
            );
            continue;
        }

        found.insert(url.to_string());
    }

    found
}

// Joins a raw link against the page URL with its fragment removed
fn resolve_link(base: &Url, raw: &str) -> Option<Url> {
    let without_fragment = raw.split('#').next().unwrap_or_default();

    match base.join(without_fragment) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("cannot resolve link '{raw}' on {base}: {e}");
            None
        }
    }
}
