// src/fetch/mod.rs
// =============================================================================
// This module defines how pages are fetched.
//
// Submodules:
// - http: the reqwest-backed fetcher used by the CLI
//
// The crawler only talks to the `Fetcher` trait, so tests can plug in an
// in-memory implementation and never touch the network.
// =============================================================================

mod http;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// A page that was fetched successfully.
#[derive(Debug, Clone, Serialize)]
pub struct FetchedResponse {
    /// The URL the crawler asked for (its identity in the seen set)
    pub requested_url: String,
    /// Where the request ended up after redirects
    pub url: Url,
    pub status: u16,
    #[serde(skip)]
    pub body: String,
}

impl FetchedResponse {
    /// Host of the final URL, if it has one
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

/// Anything that can fetch one URL.
///
/// Implementations must tolerate many concurrent calls and are responsible
/// for their own connection limits and timeouts.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse, FetchError>;
}

