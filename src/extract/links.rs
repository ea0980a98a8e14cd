// src/extract/links.rs
// =============================================================================
// This module pulls the crawlable links out of a parsed HTML page.
//
// How it works:
// 1. Select every <a> element that has an href attribute
// 2. Resolve the href against the page URL (like a browser does)
// 3. Keep only links that stay on the crawl domain
//
// Duplicates are kept on purpose: the scheduler removes them later, when it
// pops URLs from the frontier.
// =============================================================================

use scraper::Html;
use url::Url;

use super::filter::{is_in_scope, network_location};
use super::selector;

// Extracts in-scope absolute links from a parsed page
//
// Parameters:
//   page_url: the URL the page was fetched from (base for relative links)
//   document: the parsed page
//   domain: the crawl domain (network location of the seed)
//
// Returns: absolute URLs in document order, duplicates included
//
// Example:
//   page_url = "https://example.com/blog/"
//   <a href="post-1">      -> "https://example.com/blog/post-1"
//   <a href="#top">        -> "https://example.com/blog/#top"
//   <a href="//other.com"> -> dropped (other domain)
pub fn extract_links(page_url: &str, document: &Html, domain: &str) -> Vec<String> {
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(url = page_url, error = %e, "page URL is not a valid base, skipping links");
            return Vec::new();
        }
    };

    let anchors = selector("a[href]");

    document
        .select(&anchors)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(page_url, &base, href))
        .filter(|absolute| is_in_scope(absolute, domain))
        .collect()
}

// Resolves a possibly-relative href against the page URL
//
// The authority is kept as written so the scope check compares real text:
// - absolute hrefs are returned verbatim
// - protocol-relative hrefs ("//host/path") take the page's scheme
// - relative hrefs are joined and keep the page URL's authority text
//
// Unlike a link checker, fragment-only links ("#section") are not skipped;
// they resolve to the page URL plus the fragment.
fn resolve_link(page_url: &str, base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }

    if let Some(rest) = href.strip_prefix("//") {
        return Some(format!("{}://{}", base.scheme(), rest));
    }

    let joined = base.join(href).ok()?.to_string();
    match (network_location(page_url), network_location(&joined)) {
        (Some(written), Some(parsed)) => {
            let tail = base.scheme().len() + "://".len() + parsed.len();
            Some(format!("{}://{}{}", base.scheme(), written, &joined[tail..]))
        }
        _ => Some(joined),
    }
}
