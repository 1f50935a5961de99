// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every crawler setting can come from three places, in increasing priority:
// built-in defaults, a JSON config file, and the flags below.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;
use site_crawler::CrawlerConfig;

#[derive(Parser, Debug)]
#[command(
    name = "site-crawler",
    version,
    about = "Crawl every page reachable from a seed URL on the same host",
    long_about = "site-crawler fetches the seed page, follows the links selected by a CSS rule \
                  that stay on the seed's host, and keeps going level by level until nothing \
                  new is found or the depth limit is reached."
)]
pub struct Cli {
    /// Seed URL to start from (e.g., https://example.com/docs/)
    pub seed_url: String,

    /// CSS selector for the elements whose links are followed
    #[arg(long, default_value = "a[href]")]
    pub follow: String,

    /// Attribute holding the link on the selected elements
    #[arg(long, default_value = "href")]
    pub attr: String,

    /// Maximum crawl depth (0 = only the seed page)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Maximum number of requests in flight at once
    #[arg(long)]
    pub max_connections: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// JSON file with crawler settings
    #[arg(long, env = "SITE_CRAWLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output the crawl report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Applies the flags that were given on top of `config`
    pub fn apply_overrides(&self, mut config: CrawlerConfig) -> CrawlerConfig {
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(max_connections) = self.max_connections {
            config.max_connections = max_connections;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Option<...> for most flags?
//    - None means "not given on the command line"
//    - That lets a config file value survive unless a flag overrides it
//    - default_value would make it impossible to tell the two apart
//
// 2. What does env = "SITE_CRAWLER_CONFIG" do?
//    - clap reads the variable when --config is not passed
//    - Needs the "env" feature of clap (see Cargo.toml)
// -----------------------------------------------------------------------------
