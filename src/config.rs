// src/config.rs
// =============================================================================
// Settings for one crawl run.
//
// A CrawlConfig is validated once, when it is built, and never changes after
// that. Bad input (a seed that is not an http/https URL, a page limit of zero,
// a negative delay) is rejected here, before the crawl loop ever starts.
// =============================================================================

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::extract::{is_crawlable_scheme, network_location};

/// Page limit used when none is given
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Pause after each successful fetch, in seconds
pub const DEFAULT_DELAY_SECS: f64 = 1.0;

/// Per-request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Browser-like identifying header sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Reasons a crawl configuration is rejected
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },
    #[error("seed URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("seed URL has no host: {0}")]
    MissingHost(String),
    #[error("max pages must be at least 1")]
    ZeroMaxPages,
    #[error("delay must be a finite, non-negative number of seconds, got {0}")]
    InvalidDelay(f64),
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}

/// When the scheduler pauses between fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelayPolicy {
    /// Pause only after a successful fetch (failed URLs move on at once)
    #[default]
    AfterSuccess,
    /// Pause after every fetch attempt, failed or not
    AfterEveryAttempt,
}

/// Immutable settings for one crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    seed: String,
    domain: String,
    max_pages: usize,
    delay: Duration,
    delay_policy: DelayPolicy,
    timeout: Duration,
    user_agent: String,
    concurrency: usize,
}

impl CrawlConfig {
    // Validates the three required settings
    //
    // Parameters:
    //   seed: the first URL to crawl, kept exactly as given; its network
    //         location (as written) becomes the domain
    //   max_pages: how many URLs may be attempted in total
    //   delay_secs: pause after each successful fetch
    pub fn new(seed: &str, max_pages: usize, delay_secs: f64) -> Result<Self, ConfigError> {
        let parsed = Url::parse(seed).map_err(|e| ConfigError::InvalidSeed {
            url: seed.to_string(),
            reason: e.to_string(),
        })?;

        if !is_crawlable_scheme(&parsed) {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let domain = match network_location(seed) {
            Some(location) if parsed.host_str().is_some_and(|host| !host.is_empty()) => {
                location.to_string()
            }
            _ => return Err(ConfigError::MissingHost(seed.to_string())),
        };

        if max_pages == 0 {
            return Err(ConfigError::ZeroMaxPages);
        }

        let delay = Duration::try_from_secs_f64(delay_secs)
            .map_err(|_| ConfigError::InvalidDelay(delay_secs))?;

        Ok(Self {
            seed: seed.to_string(),
            domain,
            max_pages,
            delay,
            delay_policy: DelayPolicy::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: 1,
        })
    }

    pub fn with_delay_policy(mut self, policy: DelayPolicy) -> Self {
        self.delay_policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// 1 keeps the strictly sequential crawl; more fetches that many pages at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Result<Self, ConfigError> {
        if concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        self.concurrency = concurrency;
        Ok(self)
    }

    /// The seed exactly as it was passed in
    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn delay_policy(&self) -> DelayPolicy {
        self.delay_policy
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}
