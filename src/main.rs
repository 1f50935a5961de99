// src/main.rs
// =============================================================================
// This is the entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments and set up logging
// 2. Build the crawler config, the HTTP fetcher and the link rule
// 3. Run the crawl and print the report
// 4. Exit with proper code (0 = success, 1 = some fetches failed, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use site_crawler::{crawl, CrawlReport, CrawlerConfig, CssRule, HttpFetcher};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CrawlerConfig::from_file(path)?,
        None => CrawlerConfig::default(),
    };
    let config = cli.apply_overrides(config);

    let rule = CssRule::new(&cli.follow, &cli.attr)?;
    // Validates the config as well
    let fetcher = HttpFetcher::new(&config)?;

    log::info!(
        "crawling {} (rule: {}, max depth: {}, connections: {})",
        cli.seed_url,
        rule,
        config.max_depth,
        config.max_connections
    );

    let report = crawl(&cli.seed_url, &rule, &fetcher, config.max_depth)
        .await
        .with_context(|| format!("crawl of {} failed", cli.seed_url))?;

    print_report(&report, cli.json)?;
    log::debug!(
        "{} of {} connections idle after the crawl",
        fetcher.available_connections(),
        config.max_connections
    );

    if report.failures.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output =
            serde_json::to_string_pretty(report).context("cannot serialize crawl report")?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &CrawlReport) {
    println!("{:<70} {:<8} {:>10}", "URL", "STATUS", "BYTES");
    println!("{}", "=".repeat(90));

    for page in &report.pages {
        println!(
            "{:<70} {:<8} {:>10}",
            truncate(page.url.as_str(), 67),
            page.status,
            page.body.len()
        );
    }

    for failure in &report.failures {
        println!(
            "{:<70} {:<8} {:>10}",
            truncate(&failure.url, 67),
            "FAILED",
            failure.error.to_string()
        );
    }

    println!();
    println!("Summary:");
    println!("   Requested: {}", report.fetched_urls().count());
    println!("   Pages:     {}", report.pages.len());
    println!("   Failed:    {}", report.failures.len());
    println!("   Levels:    {}", report.levels);
    if report.truncated() {
        println!("   Unvisited: {} (depth limit reached)", report.unvisited.len());
    }
}

fn truncate(url: &str, max: usize) -> String {
    if url.chars().count() > max {
        let head: String = url.chars().take(max).collect();
        format!("{head}...")
    } else {
        url.to_string()
    }
}
