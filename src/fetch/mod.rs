// src/fetch/mod.rs
// =============================================================================
// How the crawler gets page bodies.
//
// The scheduler only knows the Fetcher trait. In production that is the
// reqwest-based HttpFetcher; tests plug in an in-memory site instead, so the
// crawl loop can be checked without touching the network.
// =============================================================================

mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use thiserror::Error;

/// Why a page could not be fetched
///
/// Every variant is recoverable: the scheduler logs it and moves on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("too many redirects")]
    Redirect,
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("request failed: {0}")]
    Request(String),
}

/// Source of page bodies
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the body of a 2xx response, or why there is none
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[async_trait]?
//    - It lets a trait declare async methods and still be used generically
//    - Each call returns a boxed future behind the scenes
//
// 2. Why `Send + Sync` on the trait?
//    - The concurrent crawl runs several fetches at the same time, all
//      borrowing the same fetcher
// -----------------------------------------------------------------------------
