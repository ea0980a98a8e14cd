// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-domain restriction (never leaves the seed's host)
// - A hard limit on how many pages are attempted
// - Polite crawling with a delay between requests
// - Optional concurrent mode with paced request starts
//
// Submodules:
// - frontier: the FIFO queue of discovered URLs
// - pacing: minimum spacing between requests in concurrent mode
// - scheduler: the crawl loop itself
// =============================================================================

mod frontier;
mod pacing;
mod scheduler;

pub use scheduler::{CrawlReport, Crawler};
