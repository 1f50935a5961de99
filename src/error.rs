// src/error.rs
// =============================================================================
// Error types for the crawler library.
//
// Two families of errors exist:
// - CrawlError: fatal problems detected before the crawl starts (bad seed,
//   bad rule, bad config). These are returned to the caller.
// - FetchError: a single page could not be fetched. These never abort a
//   crawl; they are recorded in the report instead.
// =============================================================================

use serde::Serialize;
use thiserror::Error;

/// Errors that stop a crawl before any page is fetched.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("invalid link rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a single page could not be fetched.
///
/// Serialized with a `kind` tag so the JSON report stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    /// Server answered with a non-2xx status
    #[error("HTTP {code}")]
    Status { code: u16 },

    #[error("request timed out")]
    Timeout,

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("could not resolve hostname")]
    Dns,

    #[error("SSL certificate error")]
    Ssl,

    #[error("connection failed")]
    Connection,

    #[error("{message}")]
    Other { message: String },
}
