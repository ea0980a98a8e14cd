// src/fetch/http.rs
// =============================================================================
// The real network fetcher, built on reqwest.
//
// Key functionality:
// - One shared Client (connection pooling) with a per-request timeout
// - A browser-like User-Agent header on every request
// - Non-2xx responses become errors, so the scheduler skips them
// - reqwest errors are sorted into FetchError variants for the logs
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};

use super::{FetchError, Fetcher};
use crate::config::CrawlConfig;

const MAX_REDIRECTS: usize = 10;

/// Fetches pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the client
    //
    // Parameters:
    //   timeout: upper bound for one request, body download included
    //   user_agent: value of the User-Agent header
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = client_builder(timeout, user_agent)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }

    pub fn from_config(config: &CrawlConfig) -> Result<Self> {
        Self::new(config.timeout(), config.user_agent())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| match categorize_error(e) {
                FetchError::Request(message) => FetchError::Body(message),
                other => other,
            })
    }
}

// Client settings shared by every fetcher
fn client_builder(timeout: Duration, user_agent: &str) -> ClientBuilder {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
}

// Sorts a reqwest error into one of our FetchError variants
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure or refused connection
// - Too many redirects
// - etc.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::Redirect
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Request(error.to_string())
    }
}
