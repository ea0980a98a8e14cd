// src/extract/mod.rs
// =============================================================================
// Everything we learn from a fetched page.
//
// Submodules:
// - filter: decides whether a URL stays on the crawl domain
// - links: finds the in-scope links on a page
// - content: builds the PageRecord (title, preview, headings)
//
// All of it is pure: no network, no crawl state. The scheduler parses each
// page once and hands the same document to both extractors.
// =============================================================================

mod content;
mod filter;
mod links;

pub use content::{extract_content, PageRecord};
pub use filter::{is_in_scope, network_location};
pub use links::extract_links;

pub(crate) use filter::is_crawlable_scheme;

use scraper::{Html, Selector};

// Parses a page body and runs both extractors on it
//
// Returns: the page record and the in-scope links, in document order
//
// The parsed document never leaves this function, so callers can hold the
// result across an .await.
pub fn process_page(url: &str, body: &str, domain: &str) -> (PageRecord, Vec<String>) {
    let document = Html::parse_document(body);
    let record = extract_content(url, &document);
    let links = extract_links(url, &document, domain);
    (record, links)
}

// Builds a CSS selector from a hard-coded pattern
//
// Only called with literals from this module tree, so a parse failure is a
// programmer error.
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("hard-coded CSS selector must be valid")
}
