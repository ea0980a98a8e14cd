// src/output.rs
// =============================================================================
// This module presents crawl results.
//
// Three ways out:
// - A plain-text report file, one block per page
// - JSON on stdout (for scripts and CI)
// - A short console summary after the crawl
// =============================================================================

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::crawl::CrawlReport;
use crate::extract::PageRecord;

/// Where the text report goes when no --output is given
pub const DEFAULT_OUTPUT: &str = "crawler_results.txt";

const SEPARATOR_WIDTH: usize = 80;
const SUMMARY_PAGES: usize = 5;
const SUMMARY_TITLE_WIDTH: usize = 50;

// Writes one block per page to any writer
//
// Block layout:
//   ======== (80 wide)
//   PAGE <n>
//   ========
//
//   URL: ...
//   Title: ...
//
//   Headings: a, b, c
//
//   Preview:
//   ...
pub fn write_text_report<W: Write>(pages: &[PageRecord], writer: &mut W) -> io::Result<()> {
    let separator = "=".repeat(SEPARATOR_WIDTH);

    for (index, page) in pages.iter().enumerate() {
        writeln!(writer)?;
        writeln!(writer, "{}", separator)?;
        writeln!(writer, "PAGE {}", index + 1)?;
        writeln!(writer, "{}", separator)?;
        writeln!(writer)?;
        writeln!(writer, "URL: {}", page.url)?;
        writeln!(writer, "Title: {}", page.title)?;
        writeln!(writer)?;
        writeln!(writer, "Headings: {}", page.headings.join(", "))?;
        writeln!(writer)?;
        writeln!(writer, "Preview:")?;
        writeln!(writer, "{}", page.preview)?;
    }

    Ok(())
}

// Saves the text report to a file, replacing any previous one
pub fn save_text_report(pages: &[PageRecord], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    write_text_report(pages, &mut writer)
        .and_then(|_| writer.flush())
        .with_context(|| format!("failed to write report file {}", path.display()))?;

    tracing::info!(path = %path.display(), pages = pages.len(), "report saved");
    Ok(())
}

// Prints the whole report as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize results")?;
    println!("{}", json);
    Ok(())
}

// Prints a human-readable summary of a finished crawl
pub fn print_summary(report: &CrawlReport) {
    println!();
    println!("📊 Summary:");
    println!("   ✅ Pages crawled: {}", report.pages.len());
    println!("   ❌ Failed: {}", report.failures.len());
    println!("   📋 URLs attempted: {}", report.visited.len());

    if report.pages.is_empty() {
        return;
    }

    println!("   First {} page(s):", report.pages.len().min(SUMMARY_PAGES));
    for (index, page) in report.pages.iter().take(SUMMARY_PAGES).enumerate() {
        println!("     {}. {}", index + 1, shorten(&page.title, SUMMARY_TITLE_WIDTH));
    }
}

// Prints one page record as a block (used by `inspect`)
pub fn print_page(page: &PageRecord, links: &[String]) {
    println!("URL: {}", page.url);
    println!("Title: {}", page.title);
    println!("Headings: {}", page.headings.join(", "));
    println!("Preview: {}", page.preview);
    println!();
    println!("🔗 {} in-scope link(s):", links.len());
    for link in links {
        println!("   {}", link);
    }
}

// Cuts text to `width` characters, marking the cut with "..."
fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_string()
    }
}
