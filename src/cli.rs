// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Subcommands:
// - crawl: crawl a whole site from a seed URL and save a report
// - inspect: fetch a single page and show what the crawler would extract
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_DELAY_SECS, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::output::DEFAULT_OUTPUT;

#[derive(Parser, Debug)]
#[command(
    name = "site-crawler",
    version,
    about = "Crawl a single website breadth-first and summarize its pages",
    long_about = "site-crawler starts from a seed URL, follows links that stay on the same host, \
                  and records each page's title, headings and a short text preview. \
                  It waits between requests so it stays polite to the server."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website starting from a seed URL
    ///
    /// Example: site-crawler crawl https://example.com --max-pages 20
    Crawl {
        /// Seed URL; only pages on the same host are crawled
        seed_url: String,

        /// Maximum number of pages to attempt (failed fetches count too)
        #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
        max_pages: usize,

        /// Seconds to wait after each successful fetch (fractions allowed)
        #[arg(long, default_value_t = DEFAULT_DELAY_SECS)]
        delay: f64,

        /// Also wait after failed fetches
        #[arg(long)]
        delay_after_failure: bool,

        /// File the text report is written to
        #[arg(long, short, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Print the results as JSON on stdout as well
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        http: HttpArgs,

        /// Number of pages fetched at once (1 = strictly sequential)
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
    },

    /// Fetch one page and show its extracted record and in-scope links
    ///
    /// Example: site-crawler inspect https://example.com/about
    Inspect {
        /// Page URL; its host is used as the crawl domain
        url: String,

        /// Output JSON instead of a text block
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        http: HttpArgs,
    },
}

/// Request settings shared by both subcommands
#[derive(clap::Args, Debug)]
pub struct HttpArgs {
    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}
