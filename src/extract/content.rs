// src/extract/content.rs
// =============================================================================
// This module turns a parsed page into a PageRecord.
//
// A record holds:
// - the page title (or a placeholder when the page has none)
// - a short preview built from the first paragraphs
// - up to five h1/h2/h3 headings, in document order
//
// Missing pieces are never errors. A page without paragraphs just gets an
// empty preview, a page without headings an empty heading list.
// =============================================================================

use scraper::{ElementRef, Html};
use serde::Serialize;

use super::selector;

/// Title used when a page has no <title> element
pub const UNTITLED: &str = "Untitled";

/// Longest preview, in characters, before the ellipsis marker
pub const PREVIEW_LIMIT: usize = 200;

/// Appended to previews that were cut at PREVIEW_LIMIT
pub const ELLIPSIS: &str = "...";

const PREVIEW_PARAGRAPHS: usize = 3;
const MAX_HEADINGS: usize = 5;

/// What we keep from one successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub preview: String,
    pub headings: Vec<String>,
}

// Extracts the record for one page
//
// Parameters:
//   url: the page URL (copied into the record as-is)
//   document: the parsed page
//
// This is a pure function: same document in, same record out.
pub fn extract_content(url: &str, document: &Html) -> PageRecord {
    PageRecord {
        url: url.to_string(),
        title: extract_title(document),
        preview: extract_preview(document),
        headings: extract_headings(document),
    }
}

fn extract_title(document: &Html) -> String {
    document
        .select(&selector("title"))
        .next()
        .map(|title| element_text(&title))
        .unwrap_or_else(|| UNTITLED.to_string())
}

// Joins the first three paragraphs with single spaces
//
// Empty paragraphs still take a slot and contribute their separator, so
// "<p></p><p>b</p>" previews as " b".
fn extract_preview(document: &Html) -> String {
    let text = document
        .select(&selector("p"))
        .take(PREVIEW_PARAGRAPHS)
        .map(|paragraph| element_text(&paragraph))
        .collect::<Vec<_>>()
        .join(" ");

    truncate_preview(text)
}

// Cuts text to PREVIEW_LIMIT characters (not bytes) and marks the cut
fn truncate_preview(text: String) -> String {
    if text.chars().count() <= PREVIEW_LIMIT {
        return text;
    }

    let mut preview: String = text.chars().take(PREVIEW_LIMIT).collect();
    preview.push_str(ELLIPSIS);
    preview
}

fn extract_headings(document: &Html) -> Vec<String> {
    // One selector list keeps the levels interleaved in document order
    document
        .select(&selector("h1, h2, h3"))
        .take(MAX_HEADINGS)
        .map(|heading| element_text(&heading))
        .collect()
}

// All text nodes below an element, concatenated and trimmed
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
