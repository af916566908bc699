//! Output module for rendering crawl results
//!
//! This module handles:
//! - Printing a sitemap as indented text, pages in sorted order
//! - Exporting a sitemap as JSON
//! - Crawl statistics

pub mod stats;

pub use stats::{print_statistics, write_statistics, CrawlStatistics};

use crate::state::Sitemap;
use serde::Serialize;
use std::io::{self, Write};

/// Writes the sitemap as text
///
/// The first line gives the page count, then each page follows on its own line
/// with its links beneath it, one per line, indented by a tab.
///
/// ```text
/// Found 2 pages from http://golang.org
/// http://golang.org
///     http://golang.org/doc/
/// http://golang.org/doc/
///     http://golang.org
/// ```
pub fn write_text<W: Write>(sitemap: &Sitemap, root: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "Found {} pages from {}", sitemap.len(), root)?;
    for (url, links) in sitemap.iter() {
        writeln!(out, "{}", url)?;
        for link in links {
            writeln!(out, "\t{}", link)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a str,
    page_count: usize,
    sitemap: &'a Sitemap,
}

/// Writes the sitemap as a pretty-printed JSON document
///
/// Shape: `{"root": ..., "page_count": N, "sitemap": {page: [links...]}}` with
/// pages in sorted order.
pub fn write_json<W: Write>(sitemap: &Sitemap, root: &str, out: &mut W) -> io::Result<()> {
    let report = JsonReport {
        root,
        page_count: sitemap.len(),
        sitemap,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
