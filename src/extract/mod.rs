// src/extract/mod.rs
// =============================================================================
// This module turns a fetched page into the links the crawler should follow.
//
// Submodules:
// - rule: what counts as a link on a page (CSS selector + attribute)
// - links: resolving, filtering and deduplicating those raw links
// =============================================================================

mod links;
mod rule;

pub use links::extract_links;
pub use rule::{CssRule, LinkRule};
