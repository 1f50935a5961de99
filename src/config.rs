// src/config.rs
// =============================================================================
// Crawler configuration.
//
// Every field has a default, so an empty JSON object `{}` is a valid config
// file. CLI flags are applied on top of whatever the file provides.
// =============================================================================

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CrawlError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    /// Sent as the User-Agent header on every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upper bound on requests in flight at the same time
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Levels beyond this one are not fetched
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_connections: default_max_connections(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_user_agent() -> String {
    format!("site-crawler/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_connections() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    10
}

pub(crate) fn default_max_depth() -> usize {
    10
}

impl CrawlerConfig {
    /// Reads a JSON config file. Missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, CrawlError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| CrawlError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| CrawlError::Config(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.max_connections == 0 {
            return Err(CrawlError::Config("maxConnections must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(CrawlError::Config("timeoutSecs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
