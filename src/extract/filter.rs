// src/extract/filter.rs
// =============================================================================
// This module decides whether a URL belongs to the crawl.
//
// A URL is "in scope" when:
// - It parses as a URL at all
// - Its scheme is exactly http or https
// - Its network location (the text between "://" and the path) is exactly
//   the crawl domain, byte for byte
//
// The network location is read from the URL text as written, not from the
// parsed Url, because parsing lowercases hosts and drops default ports. So
// "EXAMPLE.com", "example.com:443" and "www.example.com" are all different
// domains from "example.com".
// =============================================================================

use url::Url;

// Checks whether a URL may be enqueued for the crawl
//
// Malformed URLs are simply out of scope; this never fails.
//
// Example:
//   is_in_scope("https://example.com/docs", "example.com") -> true
//   is_in_scope("ftp://example.com/file", "example.com")   -> false
//   is_in_scope("https://www.example.com", "example.com")  -> false
pub fn is_in_scope(url: &str, domain: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => is_crawlable_scheme(&parsed) && network_location(url) == Some(domain),
        Err(_) => false,
    }
}

// Returns the raw network location of a URL string: [user[:pass]@]host[:port]
//
// It is the text after "://" up to the first '/', '?' or '#'. No case
// folding, no port handling. Returns None when there is no "://" at all.
//
// Example:
//   network_location("https://Example.com:443/a?b") -> Some("Example.com:443")
//   network_location("mailto:someone@example.com")  -> None
pub fn network_location(url: &str) -> Option<&str> {
    let (_, rest) = url.trim_start().split_once("://")?;
    let end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

pub(crate) fn is_crawlable_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
