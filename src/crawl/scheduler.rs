// src/crawl/scheduler.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Start with the seed as the only URL in the frontier
// 2. Pop the next URL; skip it if it was already attempted
// 3. Mark it visited and fetch it
// 4. On success: record the page, enqueue every in-scope link, pause
// 5. On failure: log it and move on (no retry)
// 6. Stop when the frontier is empty or max_pages URLs were attempted
//
// All crawl state (frontier, visited set, results) belongs to one Crawler
// value. `run` consumes it, so nothing survives from one run to the next.
//
// Politeness:
// - Sequential mode pauses after each successful fetch (and optionally after
//   failures, see DelayPolicy)
// - Concurrent mode spaces request starts with a RequestPacer instead
// =============================================================================

use std::collections::HashSet;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::frontier::Frontier;
use super::pacing::RequestPacer;
use crate::config::{CrawlConfig, DelayPolicy};
use crate::extract::{is_in_scope, process_page, PageRecord};
use crate::fetch::{FetchError, Fetcher};

/// A URL whose fetch failed, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub url: String,
    pub error: String,
}

/// Everything a finished run produced
#[derive(Debug, Serialize)]
pub struct CrawlReport {
    /// Successfully processed pages, in processing order
    pub pages: Vec<PageRecord>,
    /// Attempted URLs that produced no page
    pub failures: Vec<FetchFailure>,
    /// Every URL that was attempted
    #[serde(skip)]
    pub visited: HashSet<String>,
}

pub struct Crawler<F> {
    config: CrawlConfig,
    fetcher: F,
    frontier: Frontier,
    visited: HashSet<String>,
    pages: Vec<PageRecord>,
    failures: Vec<FetchFailure>,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(config: CrawlConfig, fetcher: F) -> Self {
        let frontier = Frontier::seeded(config.seed());
        Self {
            config,
            fetcher,
            frontier,
            visited: HashSet::new(),
            pages: Vec::new(),
            failures: Vec::new(),
        }
    }

    // Runs the crawl to completion
    //
    // This never fails: page-level problems are logged and skipped, and the
    // report holds whatever was collected (possibly nothing).
    pub async fn run(mut self) -> CrawlReport {
        info!(
            seed = self.config.seed(),
            max_pages = self.config.max_pages(),
            delay = ?self.config.delay(),
            concurrency = self.config.concurrency(),
            "starting crawl"
        );

        if self.config.concurrency() > 1 {
            self.run_concurrent().await;
        } else {
            self.run_sequential().await;
        }

        info!(
            pages = self.pages.len(),
            failures = self.failures.len(),
            visited = self.visited.len(),
            "crawl finished"
        );

        CrawlReport {
            pages: self.pages,
            failures: self.failures,
            visited: self.visited,
        }
    }

    async fn run_sequential(&mut self) {
        while let Some(url) = self.next_url() {
            info!(page = self.visited.len() + 1, url = %url, "crawling");
            self.visited.insert(url.clone());

            let outcome = self.fetcher.fetch(&url).await;
            let succeeded = outcome.is_ok();
            self.handle_outcome(url, outcome);

            if succeeded || self.config.delay_policy() == DelayPolicy::AfterEveryAttempt {
                self.pause().await;
            }
        }
    }

    // Fetches up to `concurrency` distinct URLs at a time
    //
    // Only this loop touches the visited set, so no lock is needed around it.
    // Outcomes are handled in pop order, which keeps the results and the
    // frontier deterministic for a given site.
    async fn run_concurrent(&mut self) {
        let pacer = RequestPacer::new(self.config.delay());

        loop {
            let room = self.config.max_pages() - self.visited.len();
            let batch_size = self.config.concurrency().min(room);

            let mut batch = Vec::with_capacity(batch_size);
            while batch.len() < batch_size {
                let Some(url) = self.next_url() else { break };
                info!(page = self.visited.len() + 1, url = %url, "crawling");
                self.visited.insert(url.clone());
                batch.push(url);
            }

            if batch.is_empty() {
                break;
            }

            let fetcher = &self.fetcher;
            let pacer = &pacer;
            let outcomes = join_all(batch.iter().map(|url| async move {
                pacer.wait_turn().await;
                fetcher.fetch(url).await
            }))
            .await;

            for (url, outcome) in batch.into_iter().zip(outcomes) {
                self.handle_outcome(url, outcome);
            }
        }
    }

    // Pops the next URL that still needs a fetch attempt
    //
    // Returns None once max_pages URLs were attempted or the frontier runs
    // dry. Already visited URLs are dropped here, without counting against
    // the limit and without any pause.
    fn next_url(&mut self) -> Option<String> {
        while self.visited.len() < self.config.max_pages() {
            let url = self.frontier.pop()?;
            if self.visited.contains(&url) {
                debug!(url = %url, "already visited, skipping");
                continue;
            }
            return Some(url);
        }
        None
    }

    fn handle_outcome(&mut self, url: String, outcome: Result<String, FetchError>) {
        match outcome {
            Ok(body) => {
                let (record, links) = process_page(&url, &body, self.config.domain());
                debug_assert!(links.iter().all(|link| is_in_scope(link, self.config.domain())));

                self.pages.push(record);
                self.frontier.extend(links);
                debug!(url = %url, queued = self.frontier.len(), "page processed");
            }
            Err(error) => {
                warn!(url = %url, error = %error, "failed to fetch page");
                self.failures.push(FetchFailure {
                    url,
                    error: error.to_string(),
                });
            }
        }
    }

    // Sleeps for the configured delay, unless the loop is about to end anyway
    async fn pause(&self) {
        let delay = self.config.delay();
        let finished =
            self.frontier.is_empty() || self.visited.len() >= self.config.max_pages();

        if !delay.is_zero() && !finished {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    // An in-memory website: URL -> body, or URL -> HTTP status for failures.
    // Unknown URLs answer 404. Every fetch is recorded.
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, Result<String, u16>>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeSite {
        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), Ok(html.to_string()));
            self
        }

        fn failing(mut self, url: &str, status: u16) -> Self {
            self.pages.insert(url.to_string(), Err(status));
            self
        }
    }

    #[async_trait]
    impl Fetcher for FakeSite {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(FetchError::Status(*status)),
                None => Err(FetchError::Status(404)),
            }
        }
    }

    #[async_trait]
    impl<T: Fetcher> Fetcher for std::sync::Arc<T> {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            (**self).fetch(url).await
        }
    }

    fn config(max_pages: usize) -> CrawlConfig {
        CrawlConfig::new("https://example.com/", max_pages, 0.0).unwrap()
    }

    fn links_to(paths: &[&str]) -> String {
        paths
            .iter()
            .map(|path| format!(r#"<a href="{}">link</a>"#, path))
            .collect()
    }

    // home -> a, b ; a -> b, c ; b -> home ; c -> (nothing)
    fn small_site() -> FakeSite {
        FakeSite::default()
            .page(
                "https://example.com/",
                &format!("<title>Home</title>{}", links_to(&["/a", "/b", "https://other.com/x"])),
            )
            .page(
                "https://example.com/a",
                &format!("<title>A</title>{}", links_to(&["/b", "/c"])),
            )
            .page(
                "https://example.com/b",
                &format!("<title>B</title>{}", links_to(&["/"])),
            )
            .page("https://example.com/c", "<title>C</title><p>leaf</p>")
    }

    fn urls(report: &CrawlReport) -> Vec<&str> {
        report.pages.iter().map(|page| page.url.as_str()).collect()
    }

    #[tokio::test]
    async fn test_max_pages_one_stops_after_seed() {
        let report = Crawler::new(config(1), small_site()).run().await;

        assert_eq!(urls(&report), vec!["https://example.com/"]);
        assert_eq!(report.visited.len(), 1);
        assert!(report.visited.contains("https://example.com/"));
    }

    #[tokio::test]
    async fn test_seed_is_fetched_exactly_as_given() {
        let site = std::sync::Arc::new(
            FakeSite::default().page("https://example.com", &links_to(&["/about"])),
        );
        let config = CrawlConfig::new("https://example.com", 1, 0.0).unwrap();
        let report = Crawler::new(config, site.clone()).run().await;

        assert_eq!(urls(&report), vec!["https://example.com"]);
        assert_eq!(
            report.visited,
            HashSet::from(["https://example.com".to_string()])
        );
        assert_eq!(*site.requests.lock().unwrap(), vec!["https://example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_bare_seed_and_root_link_are_distinct_urls() {
        // Exact-URL dedup only: "https://example.com" and ".../" are two URLs
        let site = FakeSite::default()
            .page("https://example.com", &links_to(&["/"]))
            .page("https://example.com/", "<title>Root</title>");
        let config = CrawlConfig::new("https://example.com", 10, 0.0).unwrap();
        let report = Crawler::new(config, site).run().await;

        assert_eq!(urls(&report), vec!["https://example.com", "https://example.com/"]);
    }

    #[tokio::test]
    async fn test_breadth_first_order_and_dedup() {
        let site = std::sync::Arc::new(small_site());
        let report = Crawler::new(config(50), site.clone()).run().await;

        assert_eq!(
            urls(&report),
            vec![
                "https://example.com/",
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
            ]
        );
        assert!(report.failures.is_empty());

        // Duplicates were queued but each URL was fetched exactly once
        let requests = site.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 4);
        let unique: HashSet<_> = requests.iter().collect();
        assert_eq!(unique.len(), requests.len());
    }

    #[tokio::test]
    async fn test_other_domain_is_never_fetched() {
        let site = std::sync::Arc::new(small_site());
        let report = Crawler::new(config(50), site.clone()).run().await;

        assert!(!report.visited.contains("https://other.com/x"));
        assert!(site
            .requests
            .lock()
            .unwrap()
            .iter()
            .all(|url| is_in_scope(url, "example.com")));
    }

    #[tokio::test]
    async fn test_page_limit_bounds_results_and_visited() {
        for max_pages in 1..=5 {
            let report = Crawler::new(config(max_pages), small_site()).run().await;
            assert!(report.pages.len() <= max_pages);
            assert!(report.visited.len() <= max_pages);
            for page in &report.pages {
                assert!(report.visited.contains(&page.url));
            }
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_is_visited_but_not_recorded() {
        // /a fails, so its links (/c) are never discovered
        let site = std::sync::Arc::new(
            FakeSite::default()
                .page("https://example.com/", &links_to(&["/a", "/b", "/a"]))
                .failing("https://example.com/a", 500)
                .page("https://example.com/b", &links_to(&["/a"])),
        );
        let report = Crawler::new(config(50), site.clone()).run().await;

        assert_eq!(urls(&report), vec!["https://example.com/", "https://example.com/b"]);
        assert!(report.visited.contains("https://example.com/a"));
        assert!(!report.visited.contains("https://example.com/c"));
        assert_eq!(
            report.failures,
            vec![FetchFailure {
                url: "https://example.com/a".to_string(),
                error: "HTTP 500".to_string(),
            }]
        );

        // Never retried, even though it was linked three times
        let requests = site.requests.lock().unwrap();
        assert_eq!(requests.iter().filter(|u| *u == "https://example.com/a").count(), 1);
    }

    #[tokio::test]
    async fn test_failures_count_against_the_limit() {
        let site = FakeSite::default()
            .page("https://example.com/", &links_to(&["/missing", "/ok"]))
            .page("https://example.com/ok", "<title>OK</title>");
        let report = Crawler::new(config(2), site).run().await;

        assert_eq!(urls(&report), vec!["https://example.com/"]);
        assert_eq!(report.visited.len(), 2);
        assert_eq!(report.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_seed_yields_empty_report() {
        let report = Crawler::new(config(10), FakeSite::default()).run().await;

        assert!(report.pages.is_empty());
        assert_eq!(report.visited.len(), 1);
        assert_eq!(report.failures.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_only_follows_successful_fetches() {
        let site = FakeSite::default()
            .page("https://example.com/", &links_to(&["/a", "/missing", "/b"]))
            .page("https://example.com/a", "<p>a</p>")
            .page("https://example.com/b", "<p>b</p>");
        let config = CrawlConfig::new("https://example.com/", 10, 1.0).unwrap();

        let start = Instant::now();
        let report = Crawler::new(config, site).run().await;

        assert_eq!(report.pages.len(), 3);
        assert_eq!(report.failures.len(), 1);
        // Pauses after "/" and "/a"; none after the failure; none once the
        // frontier is empty after "/b"
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_after_every_attempt_policy() {
        let site = FakeSite::default()
            .page("https://example.com/", &links_to(&["/a", "/missing", "/b"]))
            .page("https://example.com/a", "<p>a</p>")
            .page("https://example.com/b", "<p>b</p>");
        let config = CrawlConfig::new("https://example.com/", 10, 1.0)
            .unwrap()
            .with_delay_policy(DelayPolicy::AfterEveryAttempt);

        let start = Instant::now();
        Crawler::new(config, site).run().await;

        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicates_do_not_consume_the_delay() {
        let site = FakeSite::default()
            .page("https://example.com/", &links_to(&["/", "/", "/a"]))
            .page("https://example.com/a", "<p>a</p>");
        let config = CrawlConfig::new("https://example.com/", 10, 1.0).unwrap();

        let start = Instant::now();
        let report = Crawler::new(config, site).run().await;

        assert_eq!(report.pages.len(), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_concurrent_mode_matches_sequential_pages() {
        let sequential = Crawler::new(config(50), small_site()).run().await;
        let concurrent = Crawler::new(config(50).with_concurrency(3).unwrap(), small_site())
            .run()
            .await;

        assert_eq!(urls(&concurrent), urls(&sequential));
        assert_eq!(concurrent.visited, sequential.visited);
    }

    #[tokio::test]
    async fn test_concurrent_mode_respects_page_limit() {
        let site = FakeSite::default().page(
            "https://example.com/",
            &links_to(&["/1", "/2", "/3", "/4", "/5", "/6"]),
        );
        let config = config(4).with_concurrency(3).unwrap();
        let report = Crawler::new(config, site).run().await;

        assert_eq!(report.visited.len(), 4);
        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.failures.len(), 3);
    }
}
