// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = pages crawled, 1 = nothing crawled, 2 = error)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod extract;
mod fetch;
mod output;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, HttpArgs};
use config::{CrawlConfig, DelayPolicy};
use crawl::Crawler;
use fetch::{Fetcher, HttpFetcher};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so that --json output on stdout stays clean
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            seed_url,
            max_pages,
            delay,
            delay_after_failure,
            output,
            json,
            http,
            concurrency,
        } => {
            let policy = if delay_after_failure {
                DelayPolicy::AfterEveryAttempt
            } else {
                DelayPolicy::AfterSuccess
            };

            let config = CrawlConfig::new(&seed_url, max_pages, delay)?
                .with_delay_policy(policy)
                .with_timeout(Duration::from_secs(http.timeout))
                .with_user_agent(http.user_agent)
                .with_concurrency(concurrency)?;

            handle_crawl(config, &output, json).await
        }
        Commands::Inspect { url, json, http } => handle_inspect(&url, json, &http).await,
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(config: CrawlConfig, output: &std::path::Path, json: bool) -> Result<i32> {
    println!("🔍 Crawling: {}", config.seed());
    println!("📊 Max pages: {}\n", config.max_pages());

    let fetcher = HttpFetcher::from_config(&config)?;
    let report = Crawler::new(config, fetcher).run().await;

    output::save_text_report(&report.pages, output)?;

    if json {
        output::print_json(&report)?;
    } else {
        output::print_summary(&report);
        println!("\n💾 Results saved to: {}", output.display());
    }

    if report.pages.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'inspect' subcommand: one fetch, no crawling
async fn handle_inspect(url: &str, json: bool, http: &HttpArgs) -> Result<i32> {
    // Reuse config validation for the URL; limits don't matter here
    let config = CrawlConfig::new(url, 1, 0.0)?
        .with_timeout(Duration::from_secs(http.timeout))
        .with_user_agent(http.user_agent.as_str());

    let fetcher = HttpFetcher::from_config(&config)?;
    let body = fetcher
        .fetch(config.seed())
        .await
        .with_context(|| format!("failed to fetch {}", config.seed()))?;

    let (record, links) = extract::process_page(config.seed(), &body, config.domain());

    if json {
        output::print_json(&serde_json::json!({ "page": record, "links": links }))?;
    } else {
        output::print_page(&record, &links);
    }

    Ok(0)
}
