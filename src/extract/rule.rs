// src/extract/rule.rs
// =============================================================================
// Link rules decide which strings on a page are "follow" targets.
//
// The crawler treats a rule as opaque: it hands the rule a page body and
// gets raw link strings back. Resolving and filtering those strings is the
// job of `links.rs`, not of the rule.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (built on html5ever)
// - Supports CSS selectors for finding elements
// =============================================================================

use std::fmt;

use scraper::{Html, Selector};

use crate::error::CrawlError;

/// Finds raw (possibly relative) link strings in a page body.
pub trait LinkRule: Send + Sync {
    fn find_links(&self, body: &str) -> Vec<String>;
}

// Any closure over the page body is a rule, which keeps ad-hoc rules cheap
impl<F> LinkRule for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn find_links(&self, body: &str) -> Vec<String> {
        self(body)
    }
}

/// Selects elements with a CSS selector and reads one attribute from each.
///
/// Example: `CssRule::new("li.topchapter a", "href")` follows every link
/// inside a top chapter list item.
#[derive(Clone)]
pub struct CssRule {
    source: String,
    selector: Selector,
    attribute: String,
}

impl CssRule {
    /// Parses the selector up front so a bad rule fails before crawling.
    pub fn new(selector: &str, attribute: &str) -> Result<Self, CrawlError> {
        let parsed = Selector::parse(selector).map_err(|e| CrawlError::InvalidRule {
            rule: selector.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: selector.to_string(),
            selector: parsed,
            attribute: attribute.to_string(),
        })
    }

    /// Shorthand for rules that follow `href` attributes
    pub fn hrefs(selector: &str) -> Result<Self, CrawlError> {
        Self::new(selector, "href")
    }
}

impl fmt::Debug for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CssRule")
            .field("selector", &self.source)
            .field("attribute", &self.attribute)
            .finish()
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @{}", self.source, self.attribute)
    }
}

impl LinkRule for CssRule {
    fn find_links(&self, body: &str) -> Vec<String> {
        let document = Html::parse_document(body);

        document
            .select(&self.selector)
            .filter_map(|element| element.value().attr(&self.attribute))
            .map(str::to_string)
            .collect()
    }
}
